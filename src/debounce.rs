//! Trailing-edge debouncing over caller-supplied timestamps.

use std::time::{Duration, Instant};

/// Holds the latest pushed value until `wait` has passed without another push.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub const fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Replace any pending value and restart the wait.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Take the pending value if it has been quiet for at least `wait`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let (_, pushed_at) = self.pending.as_ref()?;
        if now.saturating_duration_since(*pushed_at) < self.wait {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    /// When the pending value becomes due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.wait)
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
