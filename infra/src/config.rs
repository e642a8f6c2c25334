//! Configuration management for infrastructure services
//!
//! Sources, lowest precedence first:
//! - the preset for the environment named by `KYC_ENV` (see [`AppConfig::for_environment`])
//! - an optional `kyc.{environment}` file (TOML, YAML or JSON)
//! - an optional file named by `KYC_CONFIG_FILE`
//! - `KYC__*` environment variables, `__` separating nested keys
//!   (`KYC__OTP__COOLDOWN_SECONDS=30`)

use ::config::{Config, Environment as EnvironmentSource, File};
use tracing::debug;

use kyc_shared::config::{AppConfig, BackendProvider, Environment};

use crate::InfrastructureError;

/// Variable naming an extra configuration file
pub const CONFIG_FILE_VAR: &str = "KYC_CONFIG_FILE";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "KYC";

/// Load configuration from `.env`, files and the process environment
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // Load .env file if present

    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();

    let extra_file = std::env::var(CONFIG_FILE_VAR).ok();
    build_config(environment, extra_file.as_deref())
}

/// Layer the configuration sources for `environment`
pub fn build_config(
    environment: Environment,
    extra_file: Option<&str>,
) -> Result<AppConfig, InfrastructureError> {
    let preset = AppConfig::for_environment(environment);

    let mut builder = Config::builder()
        .add_source(Config::try_from(&preset)?)
        .add_source(File::with_name(&environment.config_file()).required(false));

    if let Some(path) = extra_file {
        builder = builder.add_source(File::with_name(path).required(true));
    }

    let config: AppConfig = builder
        .add_source(EnvironmentSource::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()?;

    validate(&config)?;

    debug!(
        environment = %config.environment,
        base_url = %config.backend.base_url,
        cooldown_seconds = config.otp.cooldown_seconds,
        event = "config_loaded",
        "Configuration loaded"
    );

    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), InfrastructureError> {
    if config.otp.code_length == 0 {
        return Err(InfrastructureError::Config(
            "otp.code_length must be at least 1".to_string(),
        ));
    }
    if config.otp.tick_interval_ms == 0 {
        return Err(InfrastructureError::Config(
            "otp.tick_interval_ms must be non-zero".to_string(),
        ));
    }
    if config.backend.provider == BackendProvider::Http && config.backend.base_url.trim().is_empty() {
        return Err(InfrastructureError::Config(
            "backend.base_url is required for the http provider".to_string(),
        ));
    }
    Ok(())
}
