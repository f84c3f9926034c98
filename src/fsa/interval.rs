//! Closed codepoint intervals labelling transitions

use crate::codec::Codepoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed interval `[min, max]` of codepoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    pub min: Codepoint,
    pub max: Codepoint,
}

impl Interval {
    /// Create an interval, swapping the bounds if given in reverse
    pub fn new(min: Codepoint, max: Codepoint) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn single(c: Codepoint) -> Self {
        Self { min: c, max: c }
    }

    pub fn contains(&self, c: Codepoint) -> bool {
        self.min <= c && c <= self.max
    }

    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min <= max).then_some(Interval { min, max })
    }

    /// Clip to `[lo, hi]`
    pub fn clip(&self, lo: Codepoint, hi: Codepoint) -> Option<Interval> {
        self.intersect(&Interval { min: lo, max: hi })
    }

    /// The parts of this interval left over once `c` is taken out.
    ///
    /// Returns the left remainder `[min, c-1]` and the right remainder
    /// `[c+1, max]`, each only when non-empty. An interval not containing
    /// `c` is returned whole on the side it lies on.
    pub fn split_around(&self, c: Codepoint) -> (Option<Interval>, Option<Interval>) {
        if !self.contains(c) {
            return if self.max < c {
                (Some(*self), None)
            } else {
                (None, Some(*self))
            };
        }
        let left = (self.min < c).then(|| Interval::new(self.min, c - 1));
        let right = (c < self.max).then(|| Interval::new(c + 1, self.max));
        (left, right)
    }

    /// Whether `other` starts at most one past the end of this interval
    pub fn touches(&self, other: &Interval) -> bool {
        other.min <= self.max.saturating_add(1) && self.min <= other.max.saturating_add(1)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "[{}-{}]", self.min, self.max)
        }
    }
}
