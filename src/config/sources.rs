use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "STALLSWEEP_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/stallsweep.toml";
const ENV_PREFIX: &str = "STALLSWEEP";
const ENV_SEPARATOR: &str = "__";

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load() -> Result<Config, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut config = load_from_sources(config_path)?;

    load_secrets(&mut config);

    Ok(config)
}

/// Same as [`load`], but with an explicit config file path (the `--config` flag)
pub fn load_with_path(config_path: PathBuf) -> Result<Config, ConfigError> {
    let _ = dotenvy::dotenv();

    let mut config = load_from_sources(config_path)?;

    load_secrets(&mut config);

    Ok(config)
}

/// Load secrets and connection settings from environment variables.
/// The API key is never stored in TOML files, only in the environment.
fn load_secrets(config: &mut Config) {
    if let Ok(api_key) = env::var("SONARR_KEY") {
        config.controller.api_key = api_key.trim().to_string();
    }

    // SONARR_HOST wins over the TOML host so containerised deployments need
    // nothing beyond the two environment variables
    if let Ok(host) = env::var("SONARR_HOST") {
        let host = host.trim();
        if !host.is_empty() {
            config.controller.host = host.to_string();
        }
    }
}

/// Load configuration from a specific path and environment
/// Useful for testing with custom config files
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    // Start with defaults (handled by struct Default implementations)
    // Add TOML file if it exists (optional)
    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::debug!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // Add environment variable overrides
    // STALLSWEEP__SWEEP__STALL_AFTER -> sweep.stall_after
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}
