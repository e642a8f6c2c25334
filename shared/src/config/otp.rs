//! OTP challenge configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default seconds a caller must wait before a resend is permitted
pub const DEFAULT_RESEND_COOLDOWN_SECONDS: u32 = 60;

/// Default number of digits in a challenge code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// OTP challenge configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Cooldown applied after every successful send or resend
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u32,

    /// Exact number of digits a challenge code must have
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Period of the cooldown clock in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: default_cooldown_seconds(),
            code_length: default_code_length(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl OtpConfig {
    /// Period of the cooldown clock
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn default_cooldown_seconds() -> u32 {
    DEFAULT_RESEND_COOLDOWN_SECONDS
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

fn default_tick_interval_ms() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.cooldown_seconds, 60);
        assert_eq!(config.code_length, 6);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: OtpConfig = serde_json::from_str(r#"{"cooldown_seconds": 30}"#).unwrap();
        assert_eq!(config.cooldown_seconds, 30);
        assert_eq!(config.code_length, 6);
        assert_eq!(config.tick_interval_ms, 1000);
    }
}
