//! Personal and government-ID data collected during intake.

use serde::{Deserialize, Serialize};
use std::fmt;

use kyc_shared::identity_numbers::{normalize_national_id, normalize_tax_id};
use kyc_shared::phone::normalize_phone_number;

/// Editable fields of a [`VerificationForm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    FullName,
    Phone,
    NationalId,
    TaxId,
}

impl FormField {
    /// All fields in display order
    pub const ALL: [FormField; 4] = [
        FormField::FullName,
        FormField::Phone,
        FormField::NationalId,
        FormField::TaxId,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormField::FullName => "full_name",
            FormField::Phone => "phone",
            FormField::NationalId => "national_id",
            FormField::TaxId => "tax_id",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Verification form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationForm {
    /// Full legal name
    pub full_name: String,

    /// 10-digit mobile number
    pub phone: String,

    /// 12-digit national (civil) ID
    pub national_id: String,

    /// Tax ID, 5 letters + 4 digits + 1 letter
    pub tax_id: String,
}

impl VerificationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::Phone => &self.phone,
            FormField::NationalId => &self.national_id,
            FormField::TaxId => &self.tax_id,
        }
    }

    /// Store user input for a field
    ///
    /// Numeric fields keep digits only and the tax ID is upper-cased, the same
    /// normalization the input controls apply while typing.
    pub fn set(&mut self, field: FormField, value: &str) {
        match field {
            FormField::FullName => self.full_name = value.to_string(),
            FormField::Phone => self.phone = normalize_phone_number(value),
            FormField::NationalId => self.national_id = normalize_national_id(value),
            FormField::TaxId => self.tax_id = normalize_tax_id(value),
        }
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, field: FormField, value: &str) -> Self {
        self.set(field, value);
        self
    }
}
