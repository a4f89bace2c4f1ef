//! Per-token rate limit on animations.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

/// Last animation time per attacking token.
///
/// The map is never pruned; it grows with the number of distinct tokens.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Mutex<HashMap<String, Instant>>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(HashMap::new()),
        }
    }

    /// Admits the token and stamps it, or returns `false` if it animated
    /// less than one interval ago.
    pub fn try_acquire(&self, token_id: &str, now: Instant) -> bool {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = last.get(token_id)
            && now.saturating_duration_since(*previous) < self.interval
        {
            return false;
        }
        last.insert(token_id.to_string(), now);
        true
    }

    pub fn tracked_tokens(&self) -> usize {
        self.last.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
