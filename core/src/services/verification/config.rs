//! Configuration for verification sessions

use std::time::Duration;

use kyc_shared::config::OtpConfig;

use crate::errors::{DomainError, DomainResult};

/// Configuration for a verification session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationConfig {
    /// Seconds a caller must wait between successful deliveries and a resend
    pub cooldown_seconds: u32,
    /// Exact number of digits in a challenge code
    pub code_length: usize,
    /// Period of the cooldown clock; one second in production
    pub tick_interval: Duration,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self::from(&OtpConfig::default())
    }
}

impl From<&OtpConfig> for VerificationConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            cooldown_seconds: config.cooldown_seconds,
            code_length: config.code_length,
            tick_interval: config.tick_interval(),
        }
    }
}

impl VerificationConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.code_length == 0 {
            return Err(DomainError::Validation {
                message: "code_length must be at least 1".to_string(),
            });
        }
        if self.tick_interval.is_zero() {
            return Err(DomainError::Validation {
                message: "tick_interval must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}
