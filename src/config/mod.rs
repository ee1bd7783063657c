//! Configuration management for stallsweep
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Environment Variables
//!
//! Settings can be overridden using environment variables with the pattern
//! `STALLSWEEP__<section>__<key>`, for example:
//! - `STALLSWEEP__SWEEP__STALL_AFTER=4h`
//! - `STALLSWEEP__HISTORY__PATH=/var/lib/stallsweep/history.json`
//!
//! Two settings come exclusively from dedicated environment variables and are
//! required: `SONARR_KEY` (the API key, never read from config files) and
//! `SONARR_HOST` (which also overrides any `[controller] host` in TOML).
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/stallsweep.toml`.
//! This can be overridden using the `STALLSWEEP_CONFIG` environment variable
//! or the `--config` flag.

mod models;
mod sources;
mod validation;

pub use crate::humanize::HumanDuration;
pub use models::{Config, ControllerConfig, HistoryConfig, SweepConfig};
pub use validation::ValidationError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or validation
    /// fails (missing API key or host, zero budgets).
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file path; environment secrets
    /// (`SONARR_KEY`, `SONARR_HOST`) still apply on top.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_with_path(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
