use std::time::{Duration, Instant};

/// Trailing-edge debounce over an explicit clock.
///
/// Every `push` restarts the window; only the last value pushed is released,
/// once no newer value has arrived for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Releases the pending value if its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((value, due)) if now >= due => Some(value),
            still_waiting => {
                self.pending = still_waiting;
                None
            }
        }
    }

    /// Drops the pending value; it will never be released.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
