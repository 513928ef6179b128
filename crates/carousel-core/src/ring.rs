#![forbid(unsafe_code)]

//! Circular lists and the cursors that rotate through them.
//!
//! Every index the carousel computes is reduced modulo the list length, so
//! a [`Ring`] never reports an out-of-range access: offsets far outside the
//! list simply wrap around.

use serde::{Deserialize, Serialize};

/// Direction of one scroll step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward later entries (wheel delta > 0).
    Forward,
    /// Toward earlier entries.
    Backward,
}

impl Direction {
    /// Direction for a wheel delta: strictly positive is forward, everything
    /// else backward.
    #[must_use]
    pub fn from_delta(delta_y: f64) -> Self {
        if delta_y > 0.0 {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    /// Signed unit step (`+1` forward, `-1` backward).
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

/// Non-empty, fixed sequence with wrapping access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring<T> {
    items: Vec<T>,
}

impl<T> Ring<T> {
    /// Build a ring, or `None` when `items` is empty.
    #[must_use]
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reduce any signed position into `0..len`.
    #[must_use]
    pub fn wrap(&self, position: i64) -> usize {
        let len = self.items.len() as i64;
        position.rem_euclid(len) as usize
    }

    /// Entry at a signed position, wrapping in both directions.
    #[must_use]
    pub fn get(&self, position: i64) -> &T {
        &self.items[self.wrap(position)]
    }

    /// Entry at `offset` positions away from `cursor`.
    #[must_use]
    pub fn around(&self, cursor: Cursor, offset: i32) -> &T {
        self.get(cursor.index() as i64 + i64::from(offset))
    }
}

/// Focused index into a ring of known length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    /// Create a cursor; `None` if `len` is zero or `index` is out of range.
    #[must_use]
    pub const fn new(index: usize, len: usize) -> Option<Self> {
        if len == 0 || index >= len {
            None
        } else {
            Some(Self { index, len })
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Length of the ring this cursor rotates through.
    #[must_use]
    pub const fn ring_len(self) -> usize {
        self.len
    }

    /// Move one position in `direction`, wrapping at either end.
    pub fn shift(&mut self, direction: Direction) {
        self.index = match direction {
            Direction::Forward => (self.index + 1) % self.len,
            Direction::Backward => (self.index + self.len - 1) % self.len,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{Cursor, Direction, Ring};

    fn names() -> Ring<&'static str> {
        Ring::new(vec!["a", "b", "c"]).expect("non-empty")
    }

    #[test]
    fn empty_ring_is_rejected() {
        assert!(Ring::<u8>::new(Vec::new()).is_none());
    }

    #[test]
    fn get_wraps_negative_and_large_positions() {
        let ring = names();
        assert_eq!(*ring.get(-1), "c");
        assert_eq!(*ring.get(-4), "c");
        assert_eq!(*ring.get(3), "a");
        assert_eq!(*ring.get(7), "b");
    }

    #[test]
    fn around_is_relative_to_cursor() {
        let ring = names();
        let cursor = Cursor::new(0, 3).expect("valid cursor");
        assert_eq!(*ring.around(cursor, -2), "b");
        assert_eq!(*ring.around(cursor, 4), "b");
    }

    #[test]
    fn cursor_shift_wraps_both_ways() {
        let mut cursor = Cursor::new(2, 3).expect("valid cursor");
        cursor.shift(Direction::Forward);
        assert_eq!(cursor.index(), 0);
        cursor.shift(Direction::Backward);
        cursor.shift(Direction::Backward);
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn cursor_rejects_out_of_range() {
        assert!(Cursor::new(3, 3).is_none());
        assert!(Cursor::new(0, 0).is_none());
    }

    #[test]
    fn direction_from_delta_treats_zero_as_backward() {
        assert_eq!(Direction::from_delta(12.5), Direction::Forward);
        assert_eq!(Direction::from_delta(-0.1), Direction::Backward);
        assert_eq!(Direction::from_delta(0.0), Direction::Backward);
        assert_eq!(Direction::Forward.reversed().sign(), -1);
    }
}
