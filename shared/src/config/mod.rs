//! Configuration module with business-specific sub-modules
//!
//! - `backend` - OTP backend location and per-role endpoint paths
//! - `environment` - Environment detection and logging configuration
//! - `otp` - Challenge code length, resend cooldown and clock period

pub mod backend;
pub mod environment;
pub mod otp;

use serde::{Deserialize, Serialize};

pub use backend::{BackendConfig, BackendProvider, EndpointPaths};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;

/// Complete application configuration combining all sub-configurations
///
/// Missing sections fall back to the development preset.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: Environment,

    /// OTP challenge configuration
    pub otp: OtpConfig,

    /// OTP backend configuration
    pub backend: BackendConfig,

    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    /// Mock backend and pretty logs
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            otp: OtpConfig::default(),
            backend: BackendConfig::mock(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// HTTP backend with no base URL; the deployment must supply
    /// `backend.base_url` before the configuration validates
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            otp: OtpConfig::default(),
            backend: BackendConfig::new(""),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Preset for `environment`
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => Self {
                environment: Environment::Staging,
                backend: BackendConfig::default(),
                logging: LoggingConfig::for_environment(Environment::Staging),
                ..Self::development()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_uses_mock_backend() {
        let config = AppConfig::development();
        assert_eq!(config.backend.provider, BackendProvider::Mock);
        assert_eq!(config.otp.cooldown_seconds, 60);
    }

    #[test]
    fn test_empty_document_deserializes_to_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.otp, OtpConfig::default());
        assert_eq!(config.backend.provider, BackendProvider::Mock);
        assert_eq!(config.backend.agent.verify, "/kyc/agent/otp/verify");
    }

    #[test]
    fn test_default_matches_development_preset() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.backend.provider, BackendProvider::Mock);
        assert_eq!(config.logging, LoggingConfig::for_environment(Environment::Development));
    }

    #[test]
    fn test_production_leaves_base_url_unset() {
        let config = AppConfig::production();
        assert_eq!(config.backend.provider, BackendProvider::Http);
        assert!(config.backend.base_url.is_empty());

        let staging = AppConfig::for_environment(Environment::Staging);
        assert_eq!(staging.backend.provider, BackendProvider::Http);
        assert_eq!(staging.backend.base_url, "http://localhost:5000/api");
    }
}
