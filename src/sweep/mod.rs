//! The sweep pass: warm-up guard, reconciliation, judgement, persistence
//!
//! One invocation is one sequential batch against the controller:
//!
//! 1. Read the controller status; bail out quietly while it is still warming
//!    up after a restart, since queue state right after startup would read as
//!    "stalled since forever".
//! 2. Load the history file and fetch the full queue.
//! 3. Reconcile the snapshot into the history ([`reconcile`]).
//! 4. Judge the history and blacklist up to the budget of stalled items
//!    ([`judge`]).
//! 5. Rewrite the history file.
//!
//! A failed status or queue fetch aborts the run with the history untouched.
//! A failed blacklist call is logged and the record evicted anyway; retrying
//! a poisoned item every pass forever is worse than losing one grab.

mod judge;
mod reconcile;

pub use judge::{StallPolicy, Verdict, judge};
pub use reconcile::reconcile;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::history::{self, HistoryError, HistoryStore};
use crate::sonarr::{SonarrClient, SonarrError};

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Sonarr API error: {0}")]
    Api(#[from] SonarrError),

    #[error("History store error: {0}")]
    History(#[from] HistoryError),
}

pub type Result<T> = std::result::Result<T, SweepError>;

/// What a single pass did, for the closing log line
#[derive(Debug, Default)]
pub struct SweepReport {
    /// True when the warm-up guard cut the pass short
    pub skipped_warmup: bool,
    /// Real records in the history after the pass (sentinel excluded)
    pub tracked: usize,
    /// Queue item ids blacklisted this pass
    pub removed: Vec<i64>,
    /// Blacklist calls that failed; their records are evicted regardless
    pub removal_failures: usize,
}

/// True once the controller has been up long enough to trust its queue
pub fn warmed_up(start_time: DateTime<Utc>, now: DateTime<Utc>, warmup: chrono::Duration) -> bool {
    now.signed_duration_since(start_time) >= warmup
}

/// Run one sweep pass with the wall clock
pub async fn run(config: &Config) -> Result<SweepReport> {
    let client = SonarrClient::new(
        &config.controller.host,
        &config.controller.api_key,
        config.controller.request_timeout.to_std(),
    )?;

    run_with(&client, config, Utc::now()).await
}

/// Run one sweep pass against an explicit client and clock
pub async fn run_with(
    client: &SonarrClient,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<SweepReport> {
    let status = client.system_status().await?;
    if !warmed_up(status.start_time, now, config.sweep.warmup.to_chrono()) {
        info!(
            warmup = %config.sweep.warmup,
            "Controller started recently, skipping this pass"
        );
        return Ok(SweepReport {
            skipped_warmup: true,
            ..SweepReport::default()
        });
    }

    let store = HistoryStore::open(&config.history.path)?;
    let history = store.load()?;

    let queue = client.queue(config.controller.page_size).await?;
    let mut history = reconcile(history, &queue, now);

    let policy = StallPolicy {
        stall_after: config.sweep.stall_after.to_chrono(),
        max_removals: config.sweep.max_removals,
    };
    let verdict = judge(&history, now, &policy);

    let mut report = SweepReport::default();

    for record in &verdict.stalled {
        info!(id = record.id, title = %record.title, "Blacklisting stalled download");

        match client.blocklist(record.id).await {
            Ok(()) => report.removed.push(record.id),
            Err(err) => {
                warn!(
                    id = record.id,
                    error = %err,
                    "Blacklist call failed, dropping the item from history anyway"
                );
                report.removal_failures += 1;
            }
        }

        history::remove(&mut history, record.id);
    }

    for (record, remaining) in &verdict.waiting {
        info!(
            id = record.id,
            "Giving {} more minutes to {}",
            remaining.num_minutes(),
            record.title
        );
    }

    history::ensure_sentinel(&mut history, now);
    store.save(&history)?;

    report.tracked = history.len().saturating_sub(1);
    Ok(report)
}
