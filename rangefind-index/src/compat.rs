//! A mutable interval collection for callers written against a classic add/remove/query
//! interval tree API.
//!
//! [`IntervalTree`] keeps a plain list of intervals next to a cached [`IntervalIndex`]. Any
//! mutation marks the cache dirty; the next query rebuilds the whole index from the list before
//! answering. The index itself is never patched in place.
//!
//! ```
//! use rangefind_index::compat::IntervalTree;
//!
//! let mut tree = IntervalTree::new();
//! tree.add(1, 5, "a");
//! tree.add(5, 9, "b");
//!
//! let mut hits = tree.query(5);
//! hits.sort();
//! assert_eq!(hits, vec!["a", "b"]);
//!
//! tree.remove(&"a");
//! assert_eq!(tree.query(5), vec!["b"]);
//! ```
use log::trace;

use rangefind_core::Coordinate;
use rangefind_core::models::Interval;

use crate::Overlapper;
use crate::index::IntervalIndex;

/// Mutable facade over [`IntervalIndex`] using a dirty flag.
///
/// Queries take `&mut self` because they may rebuild the cached index.
#[derive(Debug, Clone)]
pub struct IntervalTree<N, T>
where
    N: Coordinate,
    T: Clone + Send + Sync,
{
    items: Vec<Interval<N, T>>,
    /// `None` while dirty, i.e. the list changed since the index was last built.
    snapshot: Option<IntervalIndex<N, T>>,
}

impl<N, T> Default for IntervalTree<N, T>
where
    N: Coordinate,
    T: Clone + Send + Sync,
{
    fn default() -> Self {
        IntervalTree {
            items: Vec::new(),
            snapshot: None,
        }
    }
}

impl<N, T> IntervalTree<N, T>
where
    N: Coordinate,
    T: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `[start, end]` with its value.
    pub fn add(&mut self, start: N, end: N, val: T) {
        self.items.push(Interval { start, end, val });
        self.snapshot = None;
    }

    /// Remove every interval carrying `val`. Returns how many were removed.
    pub fn remove(&mut self, val: &T) -> usize
    where
        T: PartialEq,
    {
        let before = self.items.len();
        self.items.retain(|iv| iv.val != *val);
        let removed = before - self.items.len();
        if removed > 0 {
            self.snapshot = None;
        }
        removed
    }

    /// Remove every interval carrying any of `vals`. Returns how many were removed.
    pub fn remove_many<'v, I>(&mut self, vals: I) -> usize
    where
        T: PartialEq + 'v,
        I: IntoIterator<Item = &'v T>,
    {
        vals.into_iter().map(|val| self.remove(val)).sum()
    }

    /// Drop every interval.
    pub fn clear(&mut self) {
        self.items.clear();
        self.snapshot = None;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the next query has to rebuild the index.
    pub fn is_dirty(&self) -> bool {
        self.snapshot.is_none()
    }

    /// Values of all intervals containing `point`.
    pub fn query(&mut self, point: N) -> Vec<T> {
        self.index()
            .find_point_iter(point)
            .map(|iv| iv.val.clone())
            .collect()
    }

    /// Values of all intervals overlapping `[start, end]`.
    pub fn query_range(&mut self, start: N, end: N) -> Vec<T> {
        self.index()
            .find_iter(start, end)
            .map(|iv| iv.val.clone())
            .collect()
    }

    /// The up to date index, rebuilt first if anything changed since the last query.
    pub fn index(&mut self) -> &IntervalIndex<N, T> {
        let items = &self.items;
        self.snapshot.get_or_insert_with(|| {
            trace!("Rebuilding interval index from {} intervals", items.len());
            IntervalIndex::build(items.clone())
        })
    }
}

impl<N, T> FromIterator<Interval<N, T>> for IntervalTree<N, T>
where
    N: Coordinate,
    T: Clone + Send + Sync,
{
    fn from_iter<It: IntoIterator<Item = Interval<N, T>>>(iter: It) -> Self {
        IntervalTree {
            items: iter.into_iter().collect(),
            snapshot: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn tree() -> IntervalTree<f64, i32> {
        [
            (1.0, 2.2, 1),
            (2.0, 2.5, 2),
            (1.0, 4.0, 3),
            (4.0, 5.0, 4),
            (5.0, 6.0, 5),
            (6.0, 20.0, 6),
        ]
        .into_iter()
        .map(Interval::from)
        .collect()
    }

    fn sorted(mut vals: Vec<i32>) -> Vec<i32> {
        vals.sort();
        vals
    }

    #[rstest]
    fn test_queries_rebuild_lazily(mut tree: IntervalTree<f64, i32>) {
        assert!(tree.is_dirty());
        assert_eq!(sorted(tree.query(2.0)), vec![1, 2, 3]);
        assert!(!tree.is_dirty());

        tree.add(1.5, 1.6, 7);
        assert!(tree.is_dirty());
        assert_eq!(tree.len(), 7);
        assert_eq!(sorted(tree.query_range(1.5, 1.5)), vec![1, 3, 7]);
        assert!(!tree.is_dirty());
    }

    #[rstest]
    fn test_remove_drops_all_equal_values(mut tree: IntervalTree<f64, i32>) {
        tree.add(10.0, 11.0, 6);
        assert_eq!(tree.remove(&6), 2);
        assert_eq!(tree.query(10.5), Vec::<i32>::new());

        // nothing removed, cache stays valid
        assert_eq!(tree.remove(&42), 0);
        assert!(!tree.is_dirty());
    }

    #[rstest]
    fn test_remove_many(mut tree: IntervalTree<f64, i32>) {
        assert_eq!(tree.remove_many(&[1, 2, 99]), 2);
        assert_eq!(sorted(tree.query(2.0)), vec![3]);
    }

    #[rstest]
    fn test_clear(mut tree: IntervalTree<f64, i32>) {
        tree.query(2.0);
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.is_dirty());
        assert_eq!(tree.query_range(-100.0, 100.0), Vec::<i32>::new());
        assert!(tree.index().is_empty());
    }

    #[rstest]
    fn test_index_is_cached_until_changed(mut tree: IntervalTree<f64, i32>) {
        assert_eq!(tree.index().len(), 6);
        assert!(!tree.is_dirty());
        assert_eq!(tree.index().upper_bound(), 20.0);

        tree.add(-3.0, 30.0, 8);
        assert!(tree.is_dirty());
        let index = tree.index();
        assert_eq!(index.len(), 7);
        assert_eq!(index.lower_bound(), -3.0);
        assert_eq!(index.upper_bound(), 30.0);
        assert!(!tree.is_dirty());
    }

    #[rstest]
    fn test_rebuilt_index_is_independent(mut tree: IntervalTree<f64, i32>) {
        let before = tree.index().clone();
        tree.clear();
        assert_eq!(before.len(), 6);
        assert_eq!(tree.index().len(), 0);
    }
}
