//! Field validator for the verification form
//!
//! All rules are evaluated independently and every violation is reported;
//! nothing short-circuits. The result says nothing about phone-verification
//! status.

use kyc_shared::identity_numbers::{is_valid_national_id, is_valid_tax_id};
use kyc_shared::phone::{is_valid_phone, normalize_phone_number};
use kyc_shared::validation::validators;

use crate::domain::entities::{FormField, VerificationForm};
use crate::domain::value_objects::{FieldError, FieldErrors};
use crate::errors::FieldErrorKind;

/// Messages shown when a required field is empty
fn required_message(field: FormField) -> &'static str {
    match field {
        FormField::FullName => "Name is required",
        FormField::Phone => "Phone number is required",
        FormField::NationalId => "National ID number is required",
        FormField::TaxId => "Tax ID is required",
    }
}

/// Messages shown when a field is present but malformed
fn format_message(field: FormField) -> &'static str {
    match field {
        FormField::FullName => "Invalid name",
        FormField::Phone => "Invalid phone number",
        FormField::NationalId => "National ID number must be 12 digits",
        FormField::TaxId => "Invalid tax ID format",
    }
}

/// Classify a single field value
pub fn check_field(field: FormField, value: &str) -> Option<FieldErrorKind> {
    if !validators::not_empty(value) {
        return Some(FieldErrorKind::Required);
    }

    let well_formed = match field {
        FormField::FullName => true,
        FormField::Phone => is_valid_phone(value),
        FormField::NationalId => is_valid_national_id(value),
        FormField::TaxId => is_valid_tax_id(value),
    };

    (!well_formed).then_some(FieldErrorKind::InvalidFormat)
}

/// Validate a single field and attach its display message
pub fn validate_field(field: FormField, value: &str) -> Option<FieldError> {
    check_field(field, value).map(|kind| FieldError {
        kind,
        message: match kind {
            FieldErrorKind::Required => required_message(field),
            FieldErrorKind::InvalidFormat => format_message(field),
        }
        .to_string(),
    })
}

/// Validate the whole form
pub fn validate(form: &VerificationForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in FormField::ALL {
        if let Some(error) = validate_field(field, form.get(field)) {
            errors.insert(field, error.kind, error.message);
        }
    }
    errors
}

/// Guard applied before a challenge is sent
///
/// Returns the digits-only phone number on success. The messages differ from
/// the submit-time ones because they tell the user why the send button did
/// nothing.
pub fn validate_phone_for_send(phone: &str) -> Result<String, FieldError> {
    match check_field(FormField::Phone, phone) {
        None => Ok(normalize_phone_number(phone)),
        Some(FieldErrorKind::Required) => Err(FieldError {
            kind: FieldErrorKind::Required,
            message: "Phone number is required to send OTP".to_string(),
        }),
        Some(FieldErrorKind::InvalidFormat) => Err(FieldError {
            kind: FieldErrorKind::InvalidFormat,
            message: "Please enter a valid 10-digit phone number".to_string(),
        }),
    }
}
