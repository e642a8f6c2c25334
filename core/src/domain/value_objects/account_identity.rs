//! Connected account identity used as the key for every backend call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower-cased account identifier (e.g. a wallet address)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountIdentity(String);

impl AccountIdentity {
    /// Normalize a raw identifier; blank input means no connected account
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
