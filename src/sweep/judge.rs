//! Selection of stalled items under a per-run action budget

use chrono::{DateTime, Duration, Utc};

use crate::history::{HistoryMap, Record};

/// Limits for a single judgement pass
#[derive(Debug, Clone)]
pub struct StallPolicy {
    /// How long `left` must sit unchanged before an item counts as stalled
    pub stall_after: Duration,
    /// Upper bound on blacklist actions per pass
    pub max_removals: usize,
}

/// Outcome of judging the reconciled history
#[derive(Debug, Default)]
pub struct Verdict {
    /// Items to blacklist, longest-stalled first, at most `max_removals`
    pub stalled: Vec<Record>,
    /// Items still inside the stall window, with the time left until action
    pub waiting: Vec<(Record, Duration)>,
}

/// Scan the history oldest `last_change` first and pick up to the budget of
/// stalled items. The sentinel (id <= 0) never qualifies. Scanning stops as
/// soon as the budget is spent, which caps the damage a burst of
/// simultaneously-expiring items can do in one pass.
pub fn judge(history: &HistoryMap, now: DateTime<Utc>, policy: &StallPolicy) -> Verdict {
    let mut records: Vec<&Record> = history.values().collect();
    // Stable sort; map key order breaks ties deterministically
    records.sort_by_key(|record| record.last_change);

    let mut verdict = Verdict::default();

    for record in records {
        if record.id <= 0 {
            continue;
        }
        if verdict.stalled.len() >= policy.max_removals {
            break;
        }

        let elapsed = now.signed_duration_since(record.last_change);
        if elapsed >= policy.stall_after {
            verdict.stalled.push(record.clone());
        } else {
            let remaining = policy.stall_after - elapsed;
            // Items that progressed within the last minute or so aren't worth
            // reporting a countdown for
            if remaining.num_minutes() + 1 < policy.stall_after.num_minutes() {
                verdict.waiting.push((record.clone(), remaining));
            }
        }
    }

    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HistoryMap, Record, record_key};
    use chrono::TimeZone;

    const WAIT: i64 = 8 * 3600;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn policy() -> StallPolicy {
        StallPolicy {
            stall_after: Duration::seconds(WAIT),
            max_removals: 5,
        }
    }

    fn with_record(history: &mut HistoryMap, id: i64, last_change: DateTime<Utc>) {
        history.insert(
            record_key(id),
            Record {
                id,
                last_change,
                left: 1000,
                title: format!("Item {id}"),
            },
        );
    }

    #[test]
    fn test_stalled_just_past_threshold() {
        let now = ts(1_000_000);
        let mut history = HistoryMap::new();
        with_record(&mut history, 42, now - Duration::seconds(WAIT + 1));

        let verdict = judge(&history, now, &policy());
        assert_eq!(verdict.stalled.len(), 1);
        assert_eq!(verdict.stalled[0].id, 42);
    }

    #[test]
    fn test_not_stalled_just_inside_threshold() {
        let now = ts(1_000_000);
        let mut history = HistoryMap::new();
        with_record(&mut history, 42, now - Duration::seconds(WAIT - 1));

        let verdict = judge(&history, now, &policy());
        assert!(verdict.stalled.is_empty());
        assert_eq!(verdict.waiting.len(), 1);
    }

    #[test]
    fn test_exactly_at_threshold_is_stalled() {
        let now = ts(1_000_000);
        let mut history = HistoryMap::new();
        with_record(&mut history, 42, now - Duration::seconds(WAIT));

        let verdict = judge(&history, now, &policy());
        assert_eq!(verdict.stalled.len(), 1);
    }

    #[test]
    fn test_budget_caps_removals_to_oldest() {
        let now = ts(10_000_000);
        let mut history = HistoryMap::new();
        // Ten stalled records, progressively less stale as the id grows
        for id in 1..=10 {
            with_record(&mut history, id, now - Duration::seconds(WAIT + 1000 - id));
        }

        let verdict = judge(&history, now, &policy());
        assert_eq!(verdict.stalled.len(), 5);

        // The five with the smallest last_change, oldest first
        let ids: Vec<i64> = verdict.stalled.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        // Nothing past the budget gets reported either way
        assert!(verdict.waiting.is_empty());
    }

    #[test]
    fn test_sentinel_is_never_judged() {
        let now = ts(1_000_000);
        let mut history = HistoryMap::new();
        with_record(&mut history, -1, ts(0));

        let verdict = judge(&history, now, &policy());
        assert!(verdict.stalled.is_empty());
        assert!(verdict.waiting.is_empty());
    }

    #[test]
    fn test_fresh_item_has_no_countdown() {
        let now = ts(1_000_000);
        let mut history = HistoryMap::new();
        with_record(&mut history, 42, now - Duration::seconds(30));

        let verdict = judge(&history, now, &policy());
        assert!(verdict.stalled.is_empty());
        assert!(verdict.waiting.is_empty());
    }

    #[test]
    fn test_waiting_reports_time_remaining() {
        let now = ts(1_000_000);
        let mut history = HistoryMap::new();
        with_record(&mut history, 42, now - Duration::seconds(WAIT / 2));

        let verdict = judge(&history, now, &policy());
        assert_eq!(verdict.waiting.len(), 1);
        let (record, remaining) = &verdict.waiting[0];
        assert_eq!(record.id, 42);
        assert_eq!(remaining.num_seconds(), WAIT / 2);
    }
}
