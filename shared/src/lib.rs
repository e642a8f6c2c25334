//! Shared utilities and common types for the KYC intake workspace
//!
//! This crate provides common functionality used across all modules:
//! - Configuration types
//! - Error response structures and error codes
//! - Utility functions (phone and identity-number formats, validation)
//! - The backend OTP response shape

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, BackendConfig, BackendProvider, EndpointPaths, Environment, LogFormat,
    LoggingConfig, OtpConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use types::ChannelResponse;
pub use utils::{identity_numbers, phone, validation};
