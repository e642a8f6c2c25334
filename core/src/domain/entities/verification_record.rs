//! Verification record assembled on a successful submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kyc_shared::identity_numbers::{normalize_national_id, normalize_tax_id};
use kyc_shared::phone::normalize_phone_number;

use super::role::Role;
use super::verification_form::VerificationForm;
use crate::domain::value_objects::AccountIdentity;

/// Validated, phone-proven identity submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Unique identifier for this submission
    pub id: Uuid,

    /// Lower-cased connected account identifier
    pub identity: AccountIdentity,

    pub full_name: String,

    /// Digits only
    pub phone: String,

    /// Digits only
    pub national_id: String,

    /// Upper-cased
    pub tax_id: String,

    pub role: Role,

    /// When the record was assembled
    pub submitted_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Assemble a record from an already validated form
    pub fn new(identity: AccountIdentity, form: &VerificationForm, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            full_name: form.full_name.trim().to_string(),
            phone: normalize_phone_number(&form.phone),
            national_id: normalize_national_id(&form.national_id),
            tax_id: normalize_tax_id(&form.tax_id),
            role,
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_carries_normalized_form() {
        let form = VerificationForm {
            full_name: "  Asha Rao ".to_string(),
            phone: "987-654-3210".to_string(),
            national_id: "1234-5678-9012".to_string(),
            tax_id: "abcde1234f".to_string(),
        };
        let identity = AccountIdentity::new("0xABC").unwrap();

        let record = VerificationRecord::new(identity, &form, Role::Agent);
        assert_eq!(record.identity.as_str(), "0xabc");
        assert_eq!(record.full_name, "Asha Rao");
        assert_eq!(record.phone, "9876543210");
        assert_eq!(record.national_id, "123456789012");
        assert_eq!(record.tax_id, "ABCDE1234F");
        assert_eq!(record.role, Role::Agent);
    }
}
