//! Party role for an intake flow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents the type of party going through verification
///
/// The role is fixed for the lifetime of a flow and selects which backend
/// endpoint triple handles the phone challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A customer of the platform
    #[default]
    Customer,
    /// An agent acting on behalf of customers
    Agent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Agent => "agent",
        }
    }

    /// Where a completion hook usually navigates after a successful submission
    pub fn dashboard_route(&self) -> &'static str {
        match self {
            Role::Customer => "/customer-dashboard",
            Role::Agent => "/agent-dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "agent" => Ok(Role::Agent),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}
