use core::fmt;
use serde::{Deserialize, Serialize};

/// Closed interval `[min, max]` on how many copies of a symbol a holder has.
///
/// Writes never widen the interval: each update is clamped against the opposite end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bound {
    min: u8,
    max: u8,
}

impl Bound {
    /// Fully open interval for a holder of `capacity` cards.
    pub const fn open(capacity: u8) -> Self {
        Self {
            min: 0,
            max: capacity,
        }
    }

    pub const fn exact(value: u8) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Builds an interval, returning `None` when `min > max`.
    pub const fn new(min: u8, max: u8) -> Option<Self> {
        if min > max {
            None
        } else {
            Some(Self { min, max })
        }
    }

    pub const fn min(self) -> u8 {
        self.min
    }

    pub const fn max(self) -> u8 {
        self.max
    }

    /// Raises the lower end to `value`, never past the current upper end.
    /// Returns `true` when the interval changed.
    pub fn raise_min(&mut self, value: u8) -> bool {
        let next = value.max(self.min).min(self.max);
        let changed = next != self.min;
        self.min = next;
        changed
    }

    /// Lowers the upper end to `value`, never below the current lower end.
    /// Returns `true` when the interval changed.
    pub fn lower_max(&mut self, value: u8) -> bool {
        let next = value.min(self.max).max(self.min);
        let changed = next != self.max;
        self.max = next;
        changed
    }

    pub const fn is_exact(self) -> bool {
        self.min == self.max
    }

    pub const fn contains(self, value: u8) -> bool {
        self.min <= value && value <= self.max
    }

    pub const fn width(self) -> u8 {
        self.max - self.min
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exact() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{} - {}", self.min, self.max)
        }
    }
}
