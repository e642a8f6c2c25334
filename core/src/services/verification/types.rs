//! Types for verification session state

use serde::Serialize;

use crate::domain::entities::{Role, VerificationForm};
use crate::domain::value_objects::{FieldErrors, OtpChallengeState};

/// Point-in-time view of a session for a presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub role: Role,
    pub state: OtpChallengeState,
    /// Seconds until a resend is permitted
    pub cooldown_remaining: u32,
    /// Send or resend in flight
    pub sending: bool,
    pub verifying: bool,
    pub submitting: bool,
    pub phone_locked: bool,
    pub entered_code: String,
    /// The entered code has the full length
    pub code_ready: bool,
    pub form: VerificationForm,
    pub field_errors: FieldErrors,
    pub alive: bool,
}

impl SessionSnapshot {
    /// Whether a resend would currently be accepted
    pub fn can_resend(&self) -> bool {
        self.alive
            && self.cooldown_remaining == 0
            && !self.sending
            && !self.verifying
            && matches!(
                self.state,
                OtpChallengeState::Sent | OtpChallengeState::Verified
            )
    }
}
