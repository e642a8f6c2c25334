//! OTP Backend Module
//!
//! Concrete [`OtpBackend`] implementations:
//! - **HTTP**: role-scoped JSON endpoints of the remote OTP service
//! - **Mock**: in-process codes logged to the console for development

use std::sync::Arc;

use kyc_core::OtpBackend;
use kyc_shared::config::{AppConfig, BackendProvider};

use crate::InfrastructureError;

pub mod http_backend;
pub mod mock_backend;

pub use http_backend::{HttpOtpBackend, HttpOtpEndpoints};
pub use mock_backend::{MockFailure, MockOtpBackend, MockOtpEndpoints};

#[cfg(test)]
mod tests;

/// Create the OTP backend selected by configuration
pub fn create_backend(config: &AppConfig) -> Result<Arc<dyn OtpBackend>, InfrastructureError> {
    match config.backend.provider {
        BackendProvider::Http => {
            tracing::debug!(base_url = %config.backend.base_url, "Using HTTP OTP backend");
            Ok(Arc::new(HttpOtpBackend::new(&config.backend)?))
        }
        BackendProvider::Mock => {
            if config.environment.is_production() {
                tracing::warn!("Mock OTP backend configured in production");
            }
            Ok(Arc::new(MockOtpBackend::new(config.otp.code_length)))
        }
    }
}
