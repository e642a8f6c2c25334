//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the KYC intake flow.
//! It provides concrete implementations of the collaborators the core
//! depends on.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Backend**: HTTP client for the role-scoped OTP endpoints, plus an
//!   in-process mock
//! - **Sink**: completion hooks receiving verification records
//! - **Config**: layered configuration loading
//! - **Logging**: tracing subscriber installation

use std::sync::Arc;

use kyc_core::{
    CompletionSink, DomainError, IdentityProvider, OtpBackend, OtpChannelAdapter, Role,
    SubmissionCoordinator, VerificationConfig, VerificationSession,
};
use kyc_shared::config::AppConfig;

// Re-export core types for convenience
pub use kyc_core::errors::*;

/// OTP backend module - HTTP and mock implementations
pub mod backend;

/// Configuration loading
pub mod config;

/// Tracing subscriber setup
pub mod logging;

/// Completion sink module - receivers of verification records
pub mod sink;

pub use backend::{create_backend, HttpOtpBackend, MockOtpBackend};
pub use sink::{ChannelCompletionSink, TracingCompletionSink};

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    config: AppConfig,
    backend: Arc<dyn OtpBackend>,
}

impl InfrastructureServices {
    /// Build services from an already loaded configuration
    pub fn new(config: AppConfig) -> Result<Self, InfrastructureError> {
        let backend = create_backend(&config)?;
        Ok(Self { config, backend })
    }

    /// Build services around an already constructed backend
    pub fn with_backend(config: AppConfig, backend: Arc<dyn OtpBackend>) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn backend(&self) -> Arc<dyn OtpBackend> {
        self.backend.clone()
    }

    /// Start a verification flow for `role`
    pub fn start_session(
        &self,
        role: Role,
        identity: Arc<dyn IdentityProvider>,
        sink: Arc<dyn CompletionSink>,
    ) -> Result<VerificationSession, InfrastructureError> {
        let adapter = OtpChannelAdapter::for_role(self.backend.as_ref(), role);
        let session = VerificationSession::new(
            adapter,
            identity,
            SubmissionCoordinator::new(sink),
            VerificationConfig::from(&self.config.otp),
        )?;
        Ok(session)
    }
}

impl std::fmt::Debug for InfrastructureServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfrastructureServices")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Initialize infrastructure services
///
/// This function:
/// - Loads layered configuration
/// - Installs the tracing subscriber
/// - Constructs the configured OTP backend
pub async fn initialize() -> Result<InfrastructureServices, InfrastructureError> {
    let config = config::load_config()?;
    logging::init_tracing(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        provider = ?config.backend.provider,
        event = "infrastructure_initialized",
        "Initializing infrastructure services"
    );

    InfrastructureServices::new(config)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client construction or request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration source or deserialization error
    #[error("Configuration error: {0}")]
    ConfigSource(#[from] ::config::ConfigError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Domain-level construction error
    #[error(transparent)]
    Domain(#[from] DomainError),
}
