//! Tracing subscriber installation

use tracing_subscriber::EnvFilter;

use kyc_shared::config::{LogFormat, LoggingConfig};

use crate::InfrastructureError;

/// Install the global subscriber described by `config`
///
/// `RUST_LOG` takes precedence over `config.level` when set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = build_filter(config)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.colored)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    installed.map_err(|e| InfrastructureError::Config(format!("Failed to install tracing subscriber: {}", e)))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, InfrastructureError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            InfrastructureError::Config(format!("Invalid log filter '{}': {}", config.level, e))
        }),
    }
}
