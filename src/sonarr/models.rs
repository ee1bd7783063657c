//! Wire types for the subset of the Sonarr v3 API this tool consumes

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `GET /system/status`, reduced to the field the warm-up check needs
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub start_time: DateTime<Utc>,
}

/// One page of `GET /queue`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuePage {
    #[serde(default)]
    pub total_records: u64,
    #[serde(default)]
    pub records: Vec<QueueItem>,
}

/// A single pending download in the controller's queue
///
/// Sonarr reports `size` and `sizeleft` as decimals, so they are kept as
/// floats here and floored when recorded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    pub id: i64,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub size: f64,
    #[serde(default)]
    pub sizeleft: f64,
    /// The download client's own identifier for the transfer
    #[serde(default)]
    pub download_id: String,
    #[serde(default)]
    pub title: String,
}

impl QueueItem {
    pub fn is_torrent(&self) -> bool {
        self.protocol.eq_ignore_ascii_case("torrent")
    }
}
