#![forbid(unsafe_code)]

//! Wheel input shaping.
//!
//! Trackpads deliver a stream of small, variable deltas while mouse wheels
//! deliver a few large ones. [`WheelAccumulator`] turns both into discrete
//! unit steps: absolute deltas accumulate until they reach a threshold, at
//! which point one step fires in the sign of the event that crossed it and
//! the counter starts over.

use crate::ring::Direction;

/// Default accumulated magnitude (in wheel delta units) per step.
pub const DEFAULT_WHEEL_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct WheelAccumulator {
    threshold: f64,
    accumulated: f64,
}

impl Default for WheelAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_WHEEL_THRESHOLD)
    }
}

impl WheelAccumulator {
    /// Create an accumulator. The threshold is assumed validated by the
    /// caller (finite and positive).
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            accumulated: 0.0,
        }
    }

    /// Feed one wheel delta. Returns the step direction when the threshold
    /// is reached; the counter is reset either way once a step fires.
    pub fn push(&mut self, delta_y: f64) -> Option<Direction> {
        // Hosts occasionally report NaN/inf for synthetic events.
        if !delta_y.is_finite() {
            return None;
        }
        self.accumulated += delta_y.abs();
        if self.accumulated >= self.threshold {
            self.accumulated = 0.0;
            Some(Direction::from_delta(delta_y))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn accumulated(&self) -> f64 {
        self.accumulated
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
