//! OTP backend configuration module
//!
//! The backend exposes two structurally identical endpoint triples, one for
//! customers and one for agents. Each triple is described by an
//! [`EndpointPaths`] value relative to `base_url`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which backend implementation to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendProvider {
    /// Real HTTP backend
    #[default]
    Http,
    /// In-process mock (development and tests)
    Mock,
}

/// Paths of one send/verify/resend endpoint triple
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointPaths {
    pub send: String,
    pub verify: String,
    pub resend: String,
}

impl EndpointPaths {
    /// Conventional paths under `/kyc/{segment}/otp`
    pub fn for_segment(segment: &str) -> Self {
        Self {
            send: format!("/kyc/{}/otp/send", segment),
            verify: format!("/kyc/{}/otp/verify", segment),
            resend: format!("/kyc/{}/otp/resend", segment),
        }
    }
}

/// OTP backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Backend implementation
    #[serde(default)]
    pub provider: BackendProvider,

    /// Base URL of the backend OTP service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds applied by the HTTP client
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Customer endpoint triple
    #[serde(default = "default_customer_paths")]
    pub customer: EndpointPaths,

    /// Agent endpoint triple
    #[serde(default = "default_agent_paths")]
    pub agent: EndpointPaths,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: BackendProvider::default(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            customer: default_customer_paths(),
            agent: default_agent_paths(),
        }
    }
}

impl BackendConfig {
    /// Create a config pointing at `base_url` with default paths
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Mock backend config
    pub fn mock() -> Self {
        Self {
            provider: BackendProvider::Mock,
            ..Default::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_base_url() -> String {
    String::from("http://localhost:5000/api")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_customer_paths() -> EndpointPaths {
    EndpointPaths::for_segment("customer")
}

fn default_agent_paths() -> EndpointPaths {
    EndpointPaths::for_segment("agent")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_are_role_scoped() {
        let config = BackendConfig::default();
        assert_eq!(config.customer.send, "/kyc/customer/otp/send");
        assert_eq!(config.agent.resend, "/kyc/agent/otp/resend");
        assert_eq!(config.provider, BackendProvider::Http);
    }

    #[test]
    fn test_mock_provider_deserializes() {
        let config: BackendConfig = serde_json::from_str(r#"{"provider": "mock"}"#).unwrap();
        assert_eq!(config.provider, BackendProvider::Mock);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }
}
