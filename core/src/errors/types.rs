//! Error types for field validation, the OTP channel and submission
//!
//! Every variant maps to a stable code from [`kyc_shared::error_codes`] so a
//! presentation layer can localize or render it without string matching.

use kyc_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::{FieldErrors, OtpChallengeState, OtpOperation};

/// Field-level failure classes
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    #[error("Required")]
    Required,

    #[error("Invalid format")]
    InvalidFormat,
}

impl FieldErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            FieldErrorKind::Required => error_codes::REQUIRED,
            FieldErrorKind::InvalidFormat => error_codes::INVALID_FORMAT,
        }
    }
}

/// Failure reported by a backend transport
///
/// `message` carries a user-facing reason when the backend supplied one in an
/// error body; `detail` is the technical cause for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Transport failure: {detail}")]
pub struct TransportError {
    pub detail: String,
    pub message: Option<String>,
}

impl TransportError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Errors surfaced by OTP send, verify and resend operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("{message}")]
    InvalidPhone { kind: FieldErrorKind, message: String },

    #[error("Please enter a valid {expected}-digit OTP")]
    InvalidCodeFormat { expected: usize },

    /// The backend rejected the code; the delivered challenge is still valid
    #[error("{message}")]
    InvalidCode { message: String },

    /// Backend rejection or transport failure
    #[error("{message}")]
    ChannelError { message: String },

    #[error("Resend available in {remaining_seconds}s")]
    CooldownActive { remaining_seconds: u32 },

    #[error("An OTP {operation} request is already in progress")]
    OperationInFlight { operation: OtpOperation },

    #[error("Cannot {operation} while the challenge is {state}")]
    InvalidTransition {
        operation: OtpOperation,
        state: OtpChallengeState,
    },

    #[error("Phone number cannot be changed after an OTP has been sent")]
    PhoneLocked,

    #[error("Connect an account before verifying your phone number")]
    IdentityMissing,

    #[error("Verification session is closed")]
    SessionClosed,
}

impl OtpError {
    /// Whether the user may enter another code without requesting a resend
    pub fn allows_code_retry(&self) -> bool {
        matches!(
            self,
            OtpError::InvalidCode { .. } | OtpError::InvalidCodeFormat { .. }
        )
    }

    pub fn code(&self) -> &'static str {
        match self {
            OtpError::InvalidPhone { kind, .. } => kind.code(),
            OtpError::InvalidCodeFormat { .. } => error_codes::INVALID_CODE_FORMAT,
            OtpError::InvalidCode { .. } => error_codes::INVALID_CODE,
            OtpError::ChannelError { .. } => error_codes::CHANNEL_ERROR,
            OtpError::CooldownActive { .. } => error_codes::COOLDOWN_ACTIVE,
            OtpError::OperationInFlight { .. } => error_codes::OPERATION_IN_FLIGHT,
            OtpError::InvalidTransition { .. } => error_codes::INVALID_TRANSITION,
            OtpError::PhoneLocked => error_codes::PHONE_LOCKED,
            OtpError::IdentityMissing => error_codes::IDENTITY_MISSING,
            OtpError::SessionClosed => error_codes::SESSION_CLOSED,
        }
    }
}

impl IntoErrorResponse for OtpError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.code(), self.to_string());
        match self {
            OtpError::InvalidPhone { .. } => response.add_detail("field", "phone"),
            OtpError::CooldownActive { remaining_seconds } => {
                response.add_detail("remaining_seconds", remaining_seconds)
            }
            _ => response,
        }
    }
}

/// Reasons a submission attempt is refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Please verify your mobile number with OTP before submitting")]
    NotVerified,

    #[error("Please correct the highlighted fields: {}", .0.field_names().join(", "))]
    ValidationFailed(FieldErrors),

    #[error("Connect an account before submitting")]
    IdentityMissing,

    #[error("Another operation is in progress")]
    InFlight,

    #[error("Verification session is closed")]
    SessionClosed,

    #[error("Completion hook failed: {message}")]
    Delivery { message: String },
}

impl SubmissionError {
    pub fn code(&self) -> &'static str {
        match self {
            SubmissionError::NotVerified => error_codes::NOT_VERIFIED,
            SubmissionError::ValidationFailed(_) => error_codes::VALIDATION_FAILED,
            SubmissionError::IdentityMissing => error_codes::IDENTITY_MISSING,
            SubmissionError::InFlight => error_codes::OPERATION_IN_FLIGHT,
            SubmissionError::SessionClosed => error_codes::SESSION_CLOSED,
            SubmissionError::Delivery { .. } => error_codes::DELIVERY_FAILED,
        }
    }
}

impl IntoErrorResponse for SubmissionError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.code(), self.to_string());
        match self {
            SubmissionError::ValidationFailed(errors) => {
                response.add_detail("fields", errors.messages())
            }
            _ => response,
        }
    }
}
