//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{FieldErrorKind, OtpError, SubmissionError, TransportError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type DomainResult<T> = Result<T, DomainError>;
