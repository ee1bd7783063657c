//! Per-item download progress history
//!
//! One record per tracked queue item, keyed by `id_<queue item id>` and
//! persisted between runs so stall duration can be measured across
//! invocations. A synthetic sentinel record (id -1) is kept in the map at all
//! times so the persisted store is never left empty by pruning.
//!
//! `last_change` only moves when the observed remaining size differs from the
//! stored value; an unchanged value leaves the timestamp alone, which is what
//! lets elapsed stall time accumulate.

mod store;

pub use store::{HistoryError, HistoryStore, Result};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Id of the synthetic record that keeps the persisted map non-empty
pub const SENTINEL_ID: i64 = -1;

/// Download id carried by sentinel upserts; like every download id it plays
/// no part in keying
const SENTINEL_DOWNLOAD_ID: &str = "default";

/// Last observed progress of one queue item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    /// When `left` was last seen to differ from its stored value
    pub last_change: DateTime<Utc>,
    /// Remaining bytes, floored
    pub left: i64,
    #[serde(default)]
    pub title: String,
}

/// History records keyed by [`record_key`]. A BTreeMap keeps iteration and the
/// persisted JSON in a stable order.
pub type HistoryMap = BTreeMap<String, Record>;

/// Storage key for a queue item id
pub fn record_key(id: i64) -> String {
    format!("id_{id}")
}

/// Insert or refresh the record for a queue item.
///
/// Records are keyed by the queue item id; the download client's id is
/// accepted for log context only. `last_change` is reset to `now` only when
/// the floored remaining size differs from what is stored (or no record
/// exists yet).
pub fn upsert(
    history: &mut HistoryMap,
    download_id: &str,
    id: i64,
    left: f64,
    title: &str,
    now: DateTime<Utc>,
) {
    let key = record_key(id);
    let left = left.floor() as i64;

    match history.get(&key) {
        Some(existing) if existing.left == left => {}
        _ => {
            debug!(download_id, id, left, "Recording progress change");
            history.insert(
                key,
                Record {
                    id,
                    last_change: now,
                    left,
                    title: title.to_string(),
                },
            );
        }
    }
}

/// Drop the record for a queue item id, if any
pub fn remove(history: &mut HistoryMap, id: i64) {
    history.retain(|_, record| record.id != id);
}

/// Re-insert the sentinel so the map survives pruning non-empty
pub fn ensure_sentinel(history: &mut HistoryMap, now: DateTime<Utc>) {
    upsert(history, SENTINEL_DOWNLOAD_ID, SENTINEL_ID, 0.0, "", now);
}
