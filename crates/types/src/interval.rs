//! Half-open time intervals with explicit open ends.
//!
//! Intervals are `[start, end)`: the start is inclusive, the end exclusive.
//! An end may also be open, meaning "indefinitely into the future" on the
//! valid-time axis and "still believed" on the transaction-time axis. An open
//! end compares later than any concrete instant, so interval ends can be
//! ordered directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exclusive upper bound of a half-open interval.
///
/// The derived ordering places [`IntervalEnd::Open`] after every
/// [`IntervalEnd::Closed`] instant, giving open ends the comparison behavior
/// of positive infinity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum IntervalEnd {
    /// Bounded at a concrete instant (exclusive).
    Closed(DateTime<Utc>),
    /// Unbounded.
    Open,
}

impl IntervalEnd {
    /// Returns `true` for an open end.
    #[inline]
    pub const fn is_open(self) -> bool {
        matches!(self, IntervalEnd::Open)
    }

    /// Returns the bounding instant of a closed end.
    #[inline]
    pub fn instant(self) -> Option<DateTime<Utc>> {
        match self {
            IntervalEnd::Closed(t) => Some(t),
            IntervalEnd::Open => None,
        }
    }
}

impl From<Option<DateTime<Utc>>> for IntervalEnd {
    /// Maps `None` to an open end.
    fn from(end: Option<DateTime<Utc>>) -> Self {
        end.map_or(IntervalEnd::Open, IntervalEnd::Closed)
    }
}

/// A half-open interval `[start, end)` over absolute instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// Inclusive lower bound.
    pub start: DateTime<Utc>,
    /// Exclusive upper bound, possibly open.
    pub end: IntervalEnd,
}

impl Interval {
    /// Creates an interval from explicit bounds.
    pub fn new(start: DateTime<Utc>, end: IntervalEnd) -> Self {
        Self { start, end }
    }

    /// Creates `[start, open)`.
    pub fn open_ended(start: DateTime<Utc>) -> Self {
        Self { start, end: IntervalEnd::Open }
    }

    /// Creates `[start, end)` with a concrete end.
    pub fn bounded(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end: IntervalEnd::Closed(end) }
    }

    /// Returns `true` when the interval satisfies `start < end`.
    ///
    /// Open-ended intervals are always well formed.
    pub fn is_well_formed(&self) -> bool {
        match self.end {
            IntervalEnd::Closed(end) => self.start < end,
            IntervalEnd::Open => true,
        }
    }

    /// Point membership: `t >= start` and, for a closed end, `t < end`.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start
            && match self.end {
                IntervalEnd::Closed(end) => t < end,
                IntervalEnd::Open => true,
            }
    }

    /// Returns `true` when the two intervals intersect.
    ///
    /// Two half-open intervals overlap iff each starts before the other ends,
    /// with open ends treated as later than every instant.
    pub fn overlaps(&self, other: &Interval) -> bool {
        let self_starts_in_time = match other.end {
            IntervalEnd::Closed(end) => self.start < end,
            IntervalEnd::Open => true,
        };
        let other_starts_in_time = match self.end {
            IntervalEnd::Closed(end) => other.start < end,
            IntervalEnd::Open => true,
        };
        self_starts_in_time && other_starts_in_time
    }

    /// Returns the zero, one, or two subintervals of `self` lying outside
    /// `window`, provided the two intervals overlap.
    ///
    /// Returns an empty vector when the intervals do not overlap at all or
    /// when `window` covers `self` entirely.
    ///
    /// ```
    /// use chronica_types::Interval;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let day = |d| Utc.with_ymd_and_hms(2022, 1, d, 0, 0, 0).unwrap();
    /// let window = Interval::bounded(day(10), day(20));
    ///
    /// let wide = Interval::bounded(day(5), day(25));
    /// assert_eq!(
    ///     wide.overhangs_outside(&window),
    ///     vec![Interval::bounded(day(5), day(10)), Interval::bounded(day(20), day(25))],
    /// );
    ///
    /// let inside = Interval::bounded(day(12), day(13));
    /// assert!(inside.overhangs_outside(&window).is_empty());
    /// ```
    pub fn overhangs_outside(&self, window: &Interval) -> Vec<Interval> {
        let mut overhangs = Vec::new();
        if !self.overlaps(window) {
            return overhangs;
        }
        if self.start < window.start {
            overhangs.push(Interval::bounded(self.start, window.start));
        }
        if let IntervalEnd::Closed(window_end) = window.end {
            if IntervalEnd::Closed(window_end) < self.end {
                overhangs.push(Interval::new(window_end, self.end));
            }
        }
        overhangs
    }
}
