//! Identity provider integration

/// Source of the connected account identifier
///
/// Returns `None` while no account is connected. The session lower-cases
/// whatever is returned.
pub trait IdentityProvider: Send + Sync {
    fn connected_account(&self) -> Option<String>;
}

/// Identity fixed at construction
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    account: Option<String>,
}

impl StaticIdentity {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: Some(account.into()),
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }
}

impl IdentityProvider for StaticIdentity {
    fn connected_account(&self) -> Option<String> {
        self.account.clone()
    }
}
