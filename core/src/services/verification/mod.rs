//! Verification module for OTP-gated phone proof
//!
//! This module provides the phone-verification lifecycle:
//! - The challenge state machine and resend cooldown
//! - A session that serializes OTP operations and runs the cooldown clock
//! - Gating of final submission on a verified phone

mod config;
mod cooldown;
mod session;
mod state_machine;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationConfig;
pub use cooldown::CooldownTimer;
pub use session::VerificationSession;
pub use state_machine::OtpStateMachine;
pub use traits::{IdentityProvider, StaticIdentity};
pub use types::SessionSnapshot;
