//! Phone-challenge lifecycle states and the operations that drive them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of the phone challenge
///
/// `Unsent -> Sent -> Verifying -> Verified`, with `Verifying -> Sent` on a
/// failed verify and `Sent/Verified -> Sent` on resend. `Failed` is entered
/// only when a session is closed before the phone was verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OtpChallengeState {
    #[default]
    Unsent,
    Sent,
    Verifying,
    Verified,
    Failed,
}

impl OtpChallengeState {
    pub fn is_verified(&self) -> bool {
        matches!(self, OtpChallengeState::Verified)
    }
}

impl fmt::Display for OtpChallengeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OtpChallengeState::Unsent => "unsent",
            OtpChallengeState::Sent => "sent",
            OtpChallengeState::Verifying => "verifying",
            OtpChallengeState::Verified => "verified",
            OtpChallengeState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// OTP operations dispatched to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpOperation {
    Send,
    Verify,
    Resend,
}

impl OtpOperation {
    /// Send and resend share the "sending" busy flag
    pub fn is_sending(&self) -> bool {
        matches!(self, OtpOperation::Send | OtpOperation::Resend)
    }
}

impl fmt::Display for OtpOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OtpOperation::Send => "send",
            OtpOperation::Verify => "verify",
            OtpOperation::Resend => "resend",
        };
        f.write_str(name)
    }
}
