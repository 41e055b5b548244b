use log::debug;
use num_traits::identities::zero;

use rangefind_core::Coordinate;

use super::Overlapper;
use crate::errors::IndexError;
use rangefind_core::models::Interval;

/// A static interval index answering "which intervals overlap this query?".
///
/// Intervals are sorted once by `(start, end)` when the index is built. Next to the sorted list
/// the index keeps the longest span in the dataset. A query `[start, end]` can skip every
/// interval starting before `start - max_span`, since such an interval must end before the
/// query begins. The remaining candidates are found with a binary search and scanned forward
/// until one starts after `end`.
///
/// Overlap is inclusive: `[1, 5]` and `[5, 9]` both match a query at `5`.
///
/// # Examples
///
/// ```
/// use rangefind_index::{IntervalIndex, Overlapper, Interval};
///
/// let ranges = vec![
///     Interval { start: 1.0, end: 2.2, val: 1 },
///     Interval { start: 2.0, end: 2.5, val: 2 },
///     Interval { start: 1.0, end: 4.0, val: 3 },
///     Interval { start: 4.0, end: 5.0, val: 4 },
/// ];
///
/// let index = IntervalIndex::build(ranges);
///
/// let mut hits: Vec<i32> = index.find_point(2.0).iter().map(|iv| iv.val).collect();
/// hits.sort();
/// assert_eq!(hits, vec![1, 2, 3]);
///
/// // Count overlaps without allocating
/// assert_eq!(index.count(4.0, 4.0), 2);
/// ```
///
/// # Sequential Queries with `seek`
///
/// For queries that arrive in ascending start order, use `seek` with a cursor to replace the
/// binary search by a short forward walk:
///
/// ```
/// use rangefind_index::{IntervalIndex, Overlapper, Interval};
///
/// let intervals = (0u32..100).step_by(5)
///     .map(|x| Interval { start: x, end: x + 2, val: true })
///     .collect::<Vec<_>>();
/// let index = IntervalIndex::build(intervals);
///
/// let mut cursor = 0;
/// for i in 10u32..20 {
///     let overlaps: Vec<_> = index.seek(i, i + 5, &mut cursor).collect();
///     assert!(!overlaps.is_empty());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct IntervalIndex<N, T>
where
    N: Coordinate,
    T: Clone + Send + Sync,
{
    /// Intervals sorted by (start, end)
    intervals: Vec<Interval<N, T>>,
    /// Sorted list of start positions
    starts: Vec<N>,
    /// Sorted list of end positions
    ends: Vec<N>,
    /// The length of the longest interval
    max_span: N,
    /// Smallest start in the index
    lower_bound: N,
    /// Largest end in the index
    upper_bound: N,
}

impl<N, T> Overlapper<N, T> for IntervalIndex<N, T>
where
    N: Coordinate,
    T: Clone + Send + Sync,
{
    /// Create a new index from a vector of intervals. The vector is taken by value and sorted
    /// by `(start, end)`, so nothing the caller does afterwards can reach the index.
    /// ```
    /// use rangefind_index::{IntervalIndex, Overlapper};
    /// use rangefind_core::models::Interval;
    ///
    /// let data = (0..20).step_by(5)
    ///                   .map(|x| Interval{start: x, end: x + 10, val: true})
    ///                   .collect::<Vec<Interval<usize, bool>>>();
    /// let index = IntervalIndex::build(data);
    /// assert_eq!(index.upper_bound(), 25);
    /// ```
    fn build(mut intervals: Vec<Interval<N, T>>) -> Self
    where
        Self: Sized,
    {
        intervals.sort();

        // already in start order, only the ends need sorting
        let starts: Vec<N> = intervals.iter().map(|x| x.start).collect();
        let mut ends: Vec<N> = intervals.iter().map(|x| x.end).collect();
        ends.sort_by(|a, b| a.total_cmp(b));

        let (max_span, lower_bound, upper_bound) = Self::summarize(&intervals);

        debug!(
            "Built interval index: {} intervals, max span {:?}, bounds [{:?}, {:?}]",
            intervals.len(),
            max_span,
            lower_bound,
            upper_bound
        );

        IntervalIndex {
            intervals,
            starts,
            ends,
            max_span,
            lower_bound,
            upper_bound,
        }
    }

    /// Find all intervals that overlap start ..= stop
    /// ```
    /// use rangefind_index::{IntervalIndex, Overlapper};
    /// use rangefind_core::models::Interval;
    ///
    /// let index = IntervalIndex::build((0..100).step_by(5)
    ///                                 .map(|x| Interval{start: x, end: x+2 , val: true})
    ///                                 .collect::<Vec<Interval<usize, bool>>>());
    /// assert_eq!(index.find(5, 11).len(), 2);
    /// ```
    #[inline]
    fn find(&self, start: N, stop: N) -> Vec<Interval<N, T>> {
        self.find_iter_inner(start, stop).cloned().collect()
    }

    fn find_iter<'a>(
        &'a self,
        start: N,
        stop: N,
    ) -> Box<dyn Iterator<Item = &'a Interval<N, T>> + 'a> {
        Box::new(self.find_iter_inner(start, stop))
    }
}

impl<N, T> IntervalIndex<N, T>
where
    N: Coordinate,
    T: Clone + Send + Sync,
{
    /// Build an index from three parallel columns. Fails straight away if their lengths differ.
    /// ```
    /// use rangefind_index::{IntervalIndex, errors::IndexError};
    ///
    /// let index = IntervalIndex::from_parallel(vec![1, 5], vec![4, 9], vec!["a", "b"]).unwrap();
    /// assert_eq!(index.len(), 2);
    ///
    /// let err = IntervalIndex::from_parallel(vec![1, 5], vec![4], vec!["a", "b"]).unwrap_err();
    /// assert_eq!(err, IndexError::LengthMismatch { starts: 2, ends: 1, values: 2 });
    /// ```
    pub fn from_parallel(starts: Vec<N>, ends: Vec<N>, vals: Vec<T>) -> Result<Self, IndexError> {
        if starts.len() != ends.len() || starts.len() != vals.len() {
            return Err(IndexError::LengthMismatch {
                starts: starts.len(),
                ends: ends.len(),
                values: vals.len(),
            });
        }

        let intervals = starts
            .into_iter()
            .zip(ends)
            .zip(vals)
            .map(|((start, end), val)| Interval { start, end, val })
            .collect();

        Ok(Self::build(intervals))
    }

    /// Compute `(max_span, lower_bound, upper_bound)` for intervals already sorted by start.
    ///
    /// Walks backwards tracking the largest end seen so far. Position `i` is a point where a
    /// forward scan could stop whenever `intervals[i].start >= max_end_so_far`; queries test
    /// the equivalent `start > query_end` inline, so only the final maximum is kept.
    fn summarize(intervals: &[Interval<N, T>]) -> (N, N, N) {
        let Some(last) = intervals.last() else {
            return (zero::<N>(), zero::<N>(), zero::<N>());
        };

        let lower_bound = intervals[0].start;
        let mut max_end = last.end;
        let mut max_span = zero::<N>();

        for interval in intervals.iter().rev() {
            if interval.end > max_end {
                max_end = interval.end;
            }
            let span = interval.span();
            if span > max_span {
                max_span = span;
            }
        }

        (max_span, lower_bound, max_end)
    }

    #[inline]
    fn find_iter_inner(&self, start: N, stop: N) -> IterFind<'_, N, T> {
        IterFind {
            inner: self,
            off: Self::first_candidate(start.pruned_start(self.max_span), &self.intervals),
            start,
            stop,
        }
    }

    /// Find all intervals containing `point`. Same as `find(point, point)`.
    #[inline]
    pub fn find_point(&self, point: N) -> Vec<Interval<N, T>> {
        self.find_iter_inner(point, point).cloned().collect()
    }

    /// Iterate over all intervals containing `point` without allocating.
    #[inline]
    pub fn find_point_iter(&self, point: N) -> IterFind<'_, N, T> {
        self.find_iter_inner(point, point)
    }

    /// Get the number of intervals in the index
    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Check if the index is empty (i.e. has no intervals)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// All stored intervals, sorted by `(start, end)`.
    #[inline]
    pub fn intervals(&self) -> &[Interval<N, T>] {
        &self.intervals
    }

    /// Smallest start in the index, or zero when empty.
    #[inline]
    pub fn lower_bound(&self) -> N {
        self.lower_bound
    }

    /// Largest end in the index, or zero when empty.
    #[inline]
    pub fn upper_bound(&self) -> N {
        self.upper_bound
    }

    /// Length of the longest stored interval, or zero when empty.
    #[inline]
    pub(crate) fn max_span(&self) -> N {
        self.max_span
    }

    /// Return an iterator over the intervals in the index
    #[inline]
    pub fn iter(&'_ self) -> IterIntervals<'_, N, T> {
        IterIntervals {
            inner: self,
            pos: 0,
        }
    }

    /// Determine the first index that we should start checking for overlaps for via a binary
    /// search.
    /// Assumes that the maximum interval span in `intervals` has been subtracted from
    /// `start`, otherwise the result is undefined
    #[inline]
    pub fn first_candidate(start: N, intervals: &[Interval<N, T>]) -> usize {
        let mut size = intervals.len();
        let mut low = 0;

        while size > 0 {
            let half = size / 2;
            let other_half = size - half;
            let probe = low + half;
            let other_low = low + other_half;
            let v = &intervals[probe];
            size = half;
            low = if v.start < start { other_low } else { low }
        }
        low
    }

    /// Count all intervals that overlap start ..= stop. This performs two binary searches in
    /// order to find all the excluded elements, and then deduces the intersection from there.
    /// See [BITS](https://arxiv.org/pdf/1208.3407.pdf) for more details.
    ///
    /// Only exact when every stored interval has `start <= end` and `start <= stop`.
    /// ```
    /// use rangefind_index::{IntervalIndex, Overlapper};
    /// use rangefind_core::models::Interval;
    ///
    /// let index = IntervalIndex::build((0..100).step_by(5)
    ///                                 .map(|x| Interval{start: x, end: x+2 , val: true})
    ///                                 .collect::<Vec<Interval<usize, bool>>>());
    /// assert_eq!(index.count(5, 11), 2);
    /// ```
    #[inline]
    pub fn count(&self, start: N, stop: N) -> usize {
        let starting_before_stop = self.starts.partition_point(|s| *s <= stop);
        let ending_before_start = self.ends.partition_point(|e| *e < start);
        starting_before_stop.saturating_sub(ending_before_start)
    }

    /// Find all intervals that overlap start ..= stop, reusing a cursor between calls. When
    /// queries arrive in ascending start order the cursor only ever walks forward, instead of
    /// paying for a binary search each time. Out of order queries are still answered correctly;
    /// the cursor is re-seeded with a binary search.
    ///
    /// The cursor is passed by reference so the index itself stays immutable and can be
    /// shared across threads.
    /// ```
    /// use rangefind_index::{IntervalIndex, Overlapper};
    /// use rangefind_core::models::Interval;
    ///
    /// let index = IntervalIndex::build((0..100).step_by(5)
    ///                                 .map(|x| Interval{start: x, end: x+2 , val: true})
    ///                                 .collect::<Vec<Interval<usize, bool>>>());
    /// let mut cursor = 0;
    /// for i in index.iter() {
    ///    assert_eq!(index.seek(i.start, i.end, &mut cursor).count(), 1);
    /// }
    /// ```
    #[inline]
    pub fn seek<'a>(&'a self, start: N, stop: N, cursor: &mut usize) -> IterFind<'a, N, T> {
        let pruned = start.pruned_start(self.max_span);
        let len = self.intervals.len();

        // every interval before the cursor must start before the pruned start
        if *cursor == 0 || *cursor > len || self.intervals[*cursor - 1].start >= pruned {
            *cursor = Self::first_candidate(pruned, &self.intervals);
        }

        while *cursor < len && self.intervals[*cursor].start < pruned {
            *cursor += 1;
        }

        IterFind {
            inner: self,
            off: *cursor,
            start,
            stop,
        }
    }
}

impl<N, T> FromIterator<Interval<N, T>> for IntervalIndex<N, T>
where
    N: Coordinate,
    T: Clone + Send + Sync,
{
    fn from_iter<It: IntoIterator<Item = Interval<N, T>>>(iter: It) -> Self {
        Self::build(iter.into_iter().collect())
    }
}

impl<N, T> From<Vec<(N, N, T)>> for IntervalIndex<N, T>
where
    N: Coordinate,
    T: Clone + Send + Sync,
{
    fn from(triples: Vec<(N, N, T)>) -> Self {
        triples.into_iter().map(Interval::from).collect()
    }
}

/// An iterator over intervals in an [`IntervalIndex`] that overlap with a query range.
///
/// This struct is created by the [`find_iter`](Overlapper::find_iter) and
/// [`find_point_iter`](IntervalIndex::find_point_iter) methods, or by
/// [`seek`](IntervalIndex::seek) for sequential queries. It yields references to intervals
/// that overlap with the query without allocating a vector.
///
/// # Examples
///
/// ```
/// use rangefind_index::{IntervalIndex, Overlapper, Interval};
///
/// let intervals = vec![
///     Interval { start: 10u32, end: 20, val: "a" },
///     Interval { start: 15, end: 25, val: "b" },
/// ];
///
/// let index = IntervalIndex::build(intervals);
///
/// for interval in index.find_iter(12, 18) {
///     println!("Found: {}", interval.val);
/// }
/// ```
#[derive(Debug)]
pub struct IterFind<'a, N, T>
where
    T: Clone + Send + Sync + 'a,
    N: Coordinate,
{
    inner: &'a IntervalIndex<N, T>,
    off: usize,
    start: N,
    stop: N,
}

impl<'a, N, T> Iterator for IterFind<'a, N, T>
where
    T: Clone + Send + Sync + 'a,
    N: Coordinate,
{
    type Item = &'a Interval<N, T>;

    #[inline]
    // interval.start <= stop && interval.end >= start
    fn next(&mut self) -> Option<Self::Item> {
        while self.off < self.inner.intervals.len() {
            let interval = &self.inner.intervals[self.off];
            self.off += 1;
            if interval.start > self.stop {
                break;
            } else if interval.overlap(self.start, self.stop) {
                return Some(interval);
            }
        }
        None
    }
}

/// An iterator over all intervals in an [`IntervalIndex`], in sorted order.
///
/// This struct is created by the [`iter`](IntervalIndex::iter) method. It yields references to
/// all intervals in the index in `(start, end)` order, regardless of overlap.
pub struct IterIntervals<'a, N, T>
where
    T: Clone + Send + Sync + 'a,
    N: Coordinate,
{
    inner: &'a IntervalIndex<N, T>,
    pos: usize,
}

impl<'a, N, T> Iterator for IterIntervals<'a, N, T>
where
    T: Clone + Send + Sync + 'a,
    N: Coordinate,
{
    type Item = &'a Interval<N, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.inner.intervals.len() {
            None
        } else {
            self.pos += 1;
            self.inner.intervals.get(self.pos - 1)
        }
    }
}

impl<N, T> IntoIterator for IntervalIndex<N, T>
where
    T: Clone + Send + Sync,
    N: Coordinate,
{
    type Item = Interval<N, T>;
    type IntoIter = ::std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<'a, N, T> IntoIterator for &'a IntervalIndex<N, T>
where
    T: Clone + Send + Sync + 'a,
    N: Coordinate,
{
    type Item = &'a Interval<N, T>;
    type IntoIter = std::slice::Iter<'a, Interval<N, T>>;

    fn into_iter(self) -> std::slice::Iter<'a, Interval<N, T>> {
        self.intervals.iter()
    }
}
