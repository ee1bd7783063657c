//! Merges a live queue snapshot into the progress history

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::history::{self, HistoryMap};
use crate::sonarr::QueueItem;

/// Placeholder queue entries report a size at or below this many bytes
const MIN_TRACKED_SIZE: f64 = 1.0;

const STATUS_DELAY: &str = "delay";
const STATUS_PAUSED: &str = "paused";
const STATUS_QUEUED: &str = "queued";

/// Fold the current queue snapshot into the history.
///
/// Non-torrent items are never tracked. Delayed and paused items are skipped
/// before the live-id set is built, so any record they left behind from an
/// earlier run is pruned along with items that vanished from the queue
/// entirely. The sentinel is re-inserted after pruning.
pub fn reconcile(mut history: HistoryMap, queue: &[QueueItem], now: DateTime<Utc>) -> HistoryMap {
    let mut live_ids: HashSet<i64> = HashSet::new();

    for item in queue {
        if !item.is_torrent() {
            continue;
        }

        let status = item.status.to_lowercase();
        if status == STATUS_DELAY {
            continue;
        }

        // A paused download was halted on purpose and must not read as stalled
        if status == STATUS_PAUSED {
            continue;
        }

        live_ids.insert(item.id);

        let in_flight =
            status != STATUS_QUEUED && item.sizeleft > 0.0 && item.size > MIN_TRACKED_SIZE;
        // Some clients report torrents as complete without ever starting them
        let instantly_done = item.sizeleft == 0.0 && item.size == 0.0;

        if in_flight || instantly_done {
            history::upsert(
                &mut history,
                &item.download_id,
                item.id,
                item.sizeleft,
                &item.title,
                now,
            );
        } else {
            history::remove(&mut history, item.id);
        }
    }

    // Items gone from the queue no longer need tracking
    history.retain(|_, record| live_ids.contains(&record.id));
    history::ensure_sentinel(&mut history, now);

    history
}
