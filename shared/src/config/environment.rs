//! Deployment environment and log output settings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Variable selecting the environment preset
pub const ENVIRONMENT_VAR: &str = "KYC_ENV";

/// Deployment environment; selects configuration presets and file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Read `KYC_ENV`; unset or unrecognised values mean development
    pub fn from_env() -> Self {
        std::env::var(ENVIRONMENT_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Stem of the optional per-environment config file, e.g. `kyc.staging`
    pub fn config_file(&self) -> String {
        format!("kyc.{}", self.as_str())
    }

    /// Dotenv file loaded after `.env`, e.g. `.env.staging`
    pub fn env_file(&self) -> String {
        format!(".env.{}", self.as_str())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("Unknown environment: {}", other)),
        }
    }
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

/// Tracing subscriber settings
///
/// `level` accepts any `EnvFilter` directive, so `kyc_core=debug,info` works
/// as well as a bare level. `RUST_LOG` overrides it at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// ANSI colours; only meaningful on a terminal
    pub colored: bool,
    /// Include file and line of each event
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Development)
    }
}

impl LoggingConfig {
    /// Human-readable output locally, JSON lines once deployed
    pub fn for_environment(environment: Environment) -> Self {
        let (level, format) = match environment {
            Environment::Development => ("debug", LogFormat::Pretty),
            Environment::Staging => ("info", LogFormat::Json),
            Environment::Production => ("warn", LogFormat::Json),
        };
        let local = !environment.is_production() && format == LogFormat::Pretty;

        Self {
            level: level.to_string(),
            format,
            colored: local,
            source_location: local,
        }
    }
}
