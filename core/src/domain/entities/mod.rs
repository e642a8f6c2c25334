//! Domain entities for the intake flow

pub mod role;
pub mod verification_form;
pub mod verification_record;

pub use role::Role;
pub use verification_form::{FormField, VerificationForm};
pub use verification_record::VerificationRecord;
