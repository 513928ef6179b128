#![forbid(unsafe_code)]

//! Bookkeeping for the one-shot settle timer.
//!
//! The browser binding arms a `setTimeout` whenever the carousel enters an
//! animating phase and no timer is pending. Keeping the handle here (rather
//! than in closure state) lets `dispose()` cancel it and keeps the rules
//! testable without a browser.

use core::time::Duration;

/// Tracks the single pending settle timer by host handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettleTimer {
    pending: Option<i32>,
}

impl SettleTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Whether a timer must be armed for the current phase.
    #[must_use]
    pub const fn needs_arming(&self, animating: bool) -> bool {
        animating && self.pending.is_none()
    }

    pub fn armed(&mut self, handle: i32) {
        self.pending = Some(handle);
    }

    /// The timer callback ran.
    pub fn fired(&mut self) {
        self.pending = None;
    }

    /// Take the pending handle for cancellation.
    pub fn take(&mut self) -> Option<i32> {
        self.pending.take()
    }

    #[must_use]
    pub const fn pending(&self) -> Option<i32> {
        self.pending
    }
}

/// `setTimeout` delay in whole milliseconds, clamped to the host's `i32`.
#[must_use]
pub fn timeout_ms(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}
