//! JSON file persistence for the history map
//!
//! The store is a single flat file, rewritten wholesale at the end of every
//! run and pretty-printed so operators can inspect it. No partial updates and
//! no locking; at most one run is assumed active at a time.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::HistoryMap;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed history file: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HistoryError>;

/// Durable store for the history map at a fixed path
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Open the store, seeding an empty map on the first ever run
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            info!("Creating history at {}", path.display());
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&path, "{}")?;
        } else {
            debug!("History at {}", path.display());
        }

        Ok(Self { path })
    }

    /// Read the persisted map. A file that exists but fails to parse is an
    /// error; the run must not proceed as if the history were empty.
    pub fn load(&self) -> Result<HistoryMap> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Overwrite the persisted map wholesale
    pub fn save(&self, history: &HistoryMap) -> Result<()> {
        let raw = serde_json::to_string_pretty(history)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
