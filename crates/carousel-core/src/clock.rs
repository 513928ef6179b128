#![forbid(unsafe_code)]

//! Host-controlled monotonic time.

use core::time::Duration;

/// Deterministic monotonic clock controlled by the host.
///
/// The carousel never reads wall-clock time; hosts either advance this clock
/// explicitly (tests, headless replays) or settle transitions from their own
/// timers.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time. Moving backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

/// Convert host milliseconds into a duration, rejecting NaN, infinities and
/// non-positive values.
#[must_use]
pub fn duration_from_ms(ms: f64) -> Option<Duration> {
    if !ms.is_finite() || ms <= 0.0 {
        return None;
    }
    let max_secs = Duration::MAX.as_secs_f64();
    let secs = (ms / 1000.0).min(max_secs);
    Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
}
