//! Phone-challenge state machine
//!
//! Pure bookkeeping for one challenge: the lifecycle state, the resend
//! cooldown, the single in-flight operation and the entered-code buffer.
//! Every backend call is bracketed by a `begin_*` that checks guards and
//! marks the operation in flight, and a `finish_*` that applies the outcome.

use kyc_shared::phone::digits_only;
use kyc_shared::validation::validators;

use crate::domain::value_objects::{OtpChallengeState, OtpOperation};
use crate::errors::OtpError;
use crate::services::validation::validate_phone_for_send;

use super::cooldown::CooldownTimer;

#[derive(Debug, Clone)]
pub struct OtpStateMachine {
    state: OtpChallengeState,
    cooldown: CooldownTimer,
    in_flight: Option<OtpOperation>,
    entered_code: String,
    code_length: usize,
}

impl OtpStateMachine {
    pub fn new(cooldown_seconds: u32, code_length: usize) -> Self {
        Self {
            state: OtpChallengeState::Unsent,
            cooldown: CooldownTimer::new(cooldown_seconds),
            in_flight: None,
            entered_code: String::new(),
            code_length,
        }
    }

    pub fn state(&self) -> OtpChallengeState {
        self.state
    }

    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown.remaining()
    }

    pub fn cooldown_generation(&self) -> u64 {
        self.cooldown.generation()
    }

    pub fn in_flight(&self) -> Option<OtpOperation> {
        self.in_flight
    }

    /// Send or resend in flight
    pub fn is_sending(&self) -> bool {
        self.in_flight.map_or(false, |op| op.is_sending())
    }

    pub fn is_verifying(&self) -> bool {
        self.in_flight == Some(OtpOperation::Verify)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The phone may not be edited once a send has started
    pub fn phone_locked(&self) -> bool {
        self.state != OtpChallengeState::Unsent || self.in_flight == Some(OtpOperation::Send)
    }

    pub fn entered_code(&self) -> &str {
        &self.entered_code
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Whether the entered code has the full length
    pub fn is_code_ready(&self) -> bool {
        validators::is_digits_of_len(&self.entered_code, self.code_length)
    }

    /// Store user input as digits only, truncated to the code length
    pub fn enter_code(&mut self, raw: &str) -> &str {
        let mut digits = digits_only(raw);
        digits.truncate(self.code_length);
        self.entered_code = digits;
        &self.entered_code
    }

    /// Start a send; returns the digits-only phone to deliver to
    pub fn begin_send(&mut self, phone: &str) -> Result<String, OtpError> {
        self.ensure_idle()?;
        if self.state != OtpChallengeState::Unsent {
            return Err(self.invalid_transition(OtpOperation::Send));
        }
        let phone = validate_phone_for_send(phone).map_err(|error| OtpError::InvalidPhone {
            kind: error.kind,
            message: error.message,
        })?;

        self.in_flight = Some(OtpOperation::Send);
        Ok(phone)
    }

    /// Apply a send outcome; returns the cooldown now in effect
    pub fn finish_send(&mut self, delivered: bool) -> u32 {
        self.in_flight = None;
        if delivered && self.state == OtpChallengeState::Unsent {
            self.state = OtpChallengeState::Sent;
            self.cooldown.restart();
        }
        self.cooldown.remaining()
    }

    /// Start verifying `code`; the code must already be exactly the code length
    pub fn begin_verify(&mut self, code: &str) -> Result<(), OtpError> {
        self.ensure_idle()?;
        if self.state != OtpChallengeState::Sent {
            return Err(self.invalid_transition(OtpOperation::Verify));
        }
        if !validators::is_digits_of_len(code, self.code_length) {
            return Err(OtpError::InvalidCodeFormat {
                expected: self.code_length,
            });
        }

        self.state = OtpChallengeState::Verifying;
        self.in_flight = Some(OtpOperation::Verify);
        Ok(())
    }

    /// Apply a verify outcome; a failure returns to `Sent` so the code can be retried
    pub fn finish_verify(&mut self, accepted: bool) {
        self.in_flight = None;
        if self.state == OtpChallengeState::Verifying {
            self.state = if accepted {
                OtpChallengeState::Verified
            } else {
                OtpChallengeState::Sent
            };
        }
    }

    /// Start a resend; refused while the cooldown is running
    pub fn begin_resend(&mut self) -> Result<(), OtpError> {
        self.ensure_idle()?;
        if !matches!(
            self.state,
            OtpChallengeState::Sent | OtpChallengeState::Verified
        ) {
            return Err(self.invalid_transition(OtpOperation::Resend));
        }
        if self.cooldown.is_active() {
            return Err(OtpError::CooldownActive {
                remaining_seconds: self.cooldown.remaining(),
            });
        }

        self.in_flight = Some(OtpOperation::Resend);
        Ok(())
    }

    /// Apply a resend outcome; returns the cooldown now in effect
    ///
    /// A failed resend leaves the state untouched.
    pub fn finish_resend(&mut self, delivered: bool) -> u32 {
        self.in_flight = None;
        if delivered
            && matches!(
                self.state,
                OtpChallengeState::Sent | OtpChallengeState::Verified
            )
        {
            self.state = OtpChallengeState::Sent;
            self.cooldown.restart();
            self.entered_code.clear();
        }
        self.cooldown.remaining()
    }

    /// Drop an in-flight operation whose outcome will never arrive
    pub fn abandon(&mut self) {
        if self.in_flight.take() == Some(OtpOperation::Verify)
            && self.state == OtpChallengeState::Verifying
        {
            self.state = OtpChallengeState::Sent;
        }
    }

    /// Advance the cooldown by one second
    pub fn tick(&mut self) -> u32 {
        self.cooldown.tick()
    }

    /// Tear down; an unverified challenge ends as `Failed`
    pub fn close(&mut self) {
        self.in_flight = None;
        self.cooldown.stop();
        if self.state != OtpChallengeState::Verified {
            self.state = OtpChallengeState::Failed;
        }
    }

    fn ensure_idle(&self) -> Result<(), OtpError> {
        match self.in_flight {
            Some(operation) => Err(OtpError::OperationInFlight { operation }),
            None => Ok(()),
        }
    }

    fn invalid_transition(&self, operation: OtpOperation) -> OtpError {
        OtpError::InvalidTransition {
            operation,
            state: self.state,
        }
    }
}
