//! Field validation for the verification form

mod validator;

pub use validator::{check_field, validate, validate_field, validate_phone_for_send};
