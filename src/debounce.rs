//! Input debouncing driven by an injected clock.

use std::time::{Duration, Instant};

/// Delay between the last keystroke and the search actually applying.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// A value whose committed copy only follows the raw input once the input
/// has stopped changing for `delay`.
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    raw: T,
    committed: T,
    /// When the raw value last changed; `None` once committed.
    changed_at: Option<Instant>,
    delay: Duration,
}

impl<T: Clone + PartialEq> Debounced<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            raw: initial.clone(),
            committed: initial,
            changed_at: None,
            delay,
        }
    }

    /// Record new raw input at `now`. Repeating the same value keeps the
    /// original timer running.
    pub fn input(&mut self, value: T, now: Instant) {
        if value == self.raw {
            return;
        }
        self.raw = value;
        self.changed_at = Some(now);
    }

    /// Commit the raw value if it has been stable for the delay.
    ///
    /// Returns `true` when the committed value changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.changed_at {
            Some(at) if now.saturating_duration_since(at) >= self.delay => self.flush(),
            _ => false,
        }
    }

    /// Commit the raw value immediately.
    pub fn flush(&mut self) -> bool {
        self.changed_at = None;
        if self.committed == self.raw {
            return false;
        }
        self.committed = self.raw.clone();
        true
    }

    pub fn raw(&self) -> &T {
        &self.raw
    }

    pub fn value(&self) -> &T {
        &self.committed
    }

    pub fn is_pending(&self) -> bool {
        self.changed_at.is_some()
    }
}
