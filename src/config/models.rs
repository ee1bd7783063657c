use crate::humanize::HumanDuration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Connection settings for the Sonarr instance under supervision
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControllerConfig {
    /// Host name or full base URL; a bare host gets `https://` prepended
    #[serde(default)]
    pub host: String,
    /// API key (loaded from the `SONARR_KEY` environment variable, never from config files)
    #[serde(skip)]
    pub api_key: String,
    /// Queue page size for `GET /queue`
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: HumanDuration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            api_key: String::new(),
            page_size: default_page_size(),
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_page_size() -> u32 {
    100
}

fn default_request_timeout() -> HumanDuration {
    HumanDuration(30)
}

/// Stall detection thresholds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweepConfig {
    /// How long a download may sit without progress before it is blacklisted
    #[serde(default = "default_stall_after")]
    pub stall_after: HumanDuration,
    /// Skip the whole pass until the controller has been up this long
    #[serde(default = "default_warmup")]
    pub warmup: HumanDuration,
    /// Upper bound on blacklist actions per pass
    #[serde(default = "default_max_removals")]
    pub max_removals: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            stall_after: default_stall_after(),
            warmup: default_warmup(),
            max_removals: default_max_removals(),
        }
    }
}

fn default_stall_after() -> HumanDuration {
    HumanDuration(8 * 3600)
}

fn default_warmup() -> HumanDuration {
    HumanDuration(30 * 60)
}

fn default_max_removals() -> usize {
    5
}

/// Location of the persisted progress history
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
        }
    }
}

fn default_history_path() -> PathBuf {
    PathBuf::from("/data/history.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.controller.page_size, 100);
        assert_eq!(config.controller.request_timeout.as_secs(), 30);
        assert_eq!(config.sweep.stall_after.as_secs(), 8 * 3600);
        assert_eq!(config.sweep.warmup.as_secs(), 30 * 60);
        assert_eq!(config.sweep.max_removals, 5);
        assert_eq!(config.history.path, PathBuf::from("/data/history.json"));
    }
}
