//! Events returned by successful OTP operations.
//!
//! These replace user-facing alerts: the presentation layer decides how to
//! render them.

use serde::Serialize;

use super::value_objects::OtpOperation;

pub const DEFAULT_SENT_MESSAGE: &str = "OTP sent successfully to your mobile number!";
pub const DEFAULT_VERIFIED_MESSAGE: &str = "OTP verified successfully!";
pub const DEFAULT_RESENT_MESSAGE: &str = "OTP resent successfully!";

/// Outcome of a successful send, verify or resend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OtpEvent {
    /// A challenge code was delivered; resend is locked for `cooldown_seconds`
    CodeSent { message: String, cooldown_seconds: u32 },

    /// The phone number is proven
    CodeVerified { message: String },

    /// A fresh challenge code was delivered; any entered code was cleared
    CodeResent { message: String, cooldown_seconds: u32 },
}

impl OtpEvent {
    pub fn operation(&self) -> OtpOperation {
        match self {
            OtpEvent::CodeSent { .. } => OtpOperation::Send,
            OtpEvent::CodeVerified { .. } => OtpOperation::Verify,
            OtpEvent::CodeResent { .. } => OtpOperation::Resend,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            OtpEvent::CodeSent { message, .. }
            | OtpEvent::CodeVerified { message }
            | OtpEvent::CodeResent { message, .. } => message,
        }
    }
}
