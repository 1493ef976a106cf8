//! Debounce state machine with injected time.
//!
//! The search input pushes every keystroke and polls from a browser timer
//! armed for `deadline()`: every push moves the deadline, and one value is
//! released per pause.

/// Holds the latest pushed value until `delay_ms` have passed without a new push.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Replaces the pending value and restarts the wait from `now_ms`.
    pub fn push(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms + self.delay_ms));
    }

    /// Releases the pending value once its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now_ms >= *deadline => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Deadline of the pending value, if any.
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|(_, d)| *d)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the pending value without releasing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
