//! Backend response types

use serde::{Deserialize, Serialize};

/// Body returned by every OTP endpoint: `{ "success": bool, "message"?: string }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelResponse {
    /// Whether the backend accepted the request
    pub success: bool,

    /// Optional human-readable message from the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ChannelResponse {
    /// Accepted response
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Rejected response carrying the backend's reason
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    /// Attach a message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Message, ignoring blank strings
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}
