//! # KYC Core
//!
//! Core logic for the identity-verification intake flow.
//! This crate contains the domain entities, the field validator, the
//! role-routed OTP channel adapter, the phone-challenge state machine and
//! session, the submission coordinator and the error types they share.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
