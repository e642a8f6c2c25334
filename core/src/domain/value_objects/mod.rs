//! Value objects - immutable domain types without identity

pub mod account_identity;
pub mod challenge_state;
pub mod field_errors;

pub use account_identity::AccountIdentity;
pub use challenge_state::{OtpChallengeState, OtpOperation};
pub use field_errors::{FieldError, FieldErrors};
