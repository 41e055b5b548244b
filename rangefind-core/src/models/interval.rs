// https://github.com/sstadick/rust-lapper/blob/7e3904daed85181f1faa39b15f51935f13945976/src/lib.rs#L92
use std::cmp::Ordering::{self};

use num_traits::identities::zero;

use crate::coordinate::Coordinate;

/// Represent a range from [start, end] with an associated value.
/// Inclusive of both start and end.
///
/// Nothing checks that `start <= end`. An interval with `start > end` never contains a point,
/// and its overlap behaviour simply follows the inequalities in [`Interval::overlap`].
///
/// Equality and ordering only look at `(start, end)`; the value is carried along untouched.
///
/// ```
/// use rangefind_core::models::Interval;
///
/// let a = Interval { start: 1, end: 5, val: "a" };
/// let b = Interval { start: 5, end: 9, val: "b" };
///
/// assert!(a.overlaps(&b));
/// assert!(a.contains(5));
/// assert_eq!(a.span(), 4);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval<N, T>
where
    N: Coordinate,
{
    pub start: N,
    pub end: N,
    pub val: T,
}

impl<N, T> Interval<N, T>
where
    N: Coordinate,
{
    #[inline]
    pub fn new(start: N, end: N, val: T) -> Self {
        Interval { start, end, val }
    }

    /// Length of the interval, `end - start`. Zero when `start > end`.
    #[inline]
    pub fn span(&self) -> N {
        N::span(self.start, self.end)
    }

    /// Compute the length of the intersection between two intervals
    #[inline]
    pub fn intersect(&self, other: &Interval<N, T>) -> N {
        let start = if self.start > other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end < other.end {
            self.end
        } else {
            other.end
        };
        if end > start { N::span(start, end) } else { zero::<N>() }
    }

    /// Check if the interval overlaps `[start, end]`. Touching endpoints count.
    #[inline]
    pub fn overlap(&self, start: N, end: N) -> bool {
        start <= self.end && self.start <= end
    }

    /// Check if two intervals overlap. Symmetric: `a.overlaps(&b) == b.overlaps(&a)`.
    #[inline]
    pub fn overlaps<U>(&self, other: &Interval<N, U>) -> bool {
        self.overlap(other.start, other.end)
    }

    /// Check if `point` lies within `[start, end]`.
    #[inline]
    pub fn contains(&self, point: N) -> bool {
        self.start <= point && point <= self.end
    }
}

impl<N, T> From<(N, N, T)> for Interval<N, T>
where
    N: Coordinate,
{
    fn from((start, end, val): (N, N, T)) -> Self {
        Interval { start, end, val }
    }
}

impl<N, T> Ord for Interval<N, T>
where
    N: Coordinate,
{
    #[inline]
    fn cmp(&self, other: &Interval<N, T>) -> Ordering {
        match self.start.total_cmp(&other.start) {
            Ordering::Less => Ordering::Less,
            Ordering::Greater => Ordering::Greater,
            Ordering::Equal => self.end.total_cmp(&other.end),
        }
    }
}

impl<N, T> PartialOrd for Interval<N, T>
where
    N: Coordinate,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N, T> PartialEq for Interval<N, T>
where
    N: Coordinate,
{
    #[inline]
    fn eq(&self, other: &Interval<N, T>) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N, T> Eq for Interval<N, T> where N: Coordinate {}
