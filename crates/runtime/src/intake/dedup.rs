//! Primary/fallback reconciliation.
//!
//! Both channels usually fire for one physical attack. The primary handler
//! writes a marker before it awaits anything; the fallback handler drops any
//! event whose actor and item match a marker younger than the window.
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttackMarker {
    actor_id: String,
    item_id: Option<String>,
    at: Instant,
}

/// Holds the most recent primary-channel attack.
#[derive(Debug)]
pub struct DedupLedger {
    window: Duration,
    last: Mutex<Option<AttackMarker>>,
}

impl DedupLedger {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Overwrites the marker with this attack.
    pub fn record(&self, actor_id: &str, item_id: Option<&str>, now: Instant) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(AttackMarker {
            actor_id: actor_id.to_string(),
            item_id: item_id.map(str::to_string),
            at: now,
        });
    }

    /// Whether a fallback event for this actor and item was already handled.
    pub fn is_duplicate(&self, actor_id: &str, item_id: Option<&str>, now: Instant) -> bool {
        let last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        last.as_ref().is_some_and(|marker| {
            marker.actor_id == actor_id
                && marker.item_id.as_deref() == item_id
                && now.saturating_duration_since(marker.at) <= self.window
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn window_is_inclusive() {
        let ledger = DedupLedger::new(Duration::from_millis(2000));
        let start = Instant::now();
        ledger.record("a1", Some("i1"), start);

        assert!(ledger.is_duplicate("a1", Some("i1"), start + Duration::from_millis(2000)));
        assert!(!ledger.is_duplicate("a1", Some("i1"), start + Duration::from_millis(2100)));
    }

    #[tokio::test(start_paused = true)]
    async fn identity_must_match() {
        let ledger = DedupLedger::new(Duration::from_millis(2000));
        let now = Instant::now();
        ledger.record("a1", Some("i1"), now);

        assert!(!ledger.is_duplicate("a2", Some("i1"), now));
        assert!(!ledger.is_duplicate("a1", Some("i2"), now));
        assert!(!ledger.is_duplicate("a1", None, now));
    }

    #[tokio::test(start_paused = true)]
    async fn newer_marker_replaces_older() {
        let ledger = DedupLedger::new(Duration::from_millis(2000));
        let now = Instant::now();
        ledger.record("a1", Some("i1"), now);
        ledger.record("a2", Some("i9"), now);

        assert!(!ledger.is_duplicate("a1", Some("i1"), now));
        assert!(ledger.is_duplicate("a2", Some("i9"), now));
    }

    #[test]
    fn empty_ledger_suppresses_nothing() {
        let ledger = DedupLedger::new(Duration::from_millis(2000));
        assert!(!ledger.is_duplicate("a1", Some("i1"), Instant::now()));
    }
}
