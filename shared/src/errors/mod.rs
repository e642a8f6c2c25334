//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Error structure handed to a presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, remaining cooldown, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes used across the workspace
pub mod error_codes {
    pub const REQUIRED: &str = "REQUIRED";
    pub const INVALID_FORMAT: &str = "INVALID_FORMAT";
    pub const CHANNEL_ERROR: &str = "CHANNEL_ERROR";
    pub const INVALID_CODE: &str = "INVALID_CODE";
    pub const INVALID_CODE_FORMAT: &str = "INVALID_CODE_FORMAT";
    pub const COOLDOWN_ACTIVE: &str = "COOLDOWN_ACTIVE";
    pub const OPERATION_IN_FLIGHT: &str = "OPERATION_IN_FLIGHT";
    pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
    pub const PHONE_LOCKED: &str = "PHONE_LOCKED";
    pub const IDENTITY_MISSING: &str = "IDENTITY_MISSING";
    pub const SESSION_CLOSED: &str = "SESSION_CLOSED";
    pub const NOT_VERIFIED: &str = "NOT_VERIFIED";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const DELIVERY_FAILED: &str = "DELIVERY_FAILED";
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}
