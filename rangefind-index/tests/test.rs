use std::cmp::Ordering;
use std::ops::Add;

use num_traits::Zero;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::*;

use rangefind_core::Coordinate;
use rangefind_index::compat::IntervalTree;
use rangefind_index::{Interval, IntervalIndex, Overlapper};

fn naive<N: Coordinate>(intervals: &[Interval<N, usize>], start: N, end: N) -> Vec<usize> {
    let mut hits: Vec<usize> = intervals
        .iter()
        .filter(|iv| iv.overlap(start, end))
        .map(|iv| iv.val)
        .collect();
    hits.sort();
    hits
}

fn indexed<N: Coordinate>(index: &IntervalIndex<N, usize>, start: N, end: N) -> Vec<usize> {
    let mut hits: Vec<usize> = index.find_iter(start, end).map(|iv| iv.val).collect();
    hits.sort();
    hits
}

fn random_i64_intervals(rng: &mut StdRng, n: usize, max_span: i64) -> Vec<Interval<i64, usize>> {
    (0..n)
        .map(|val| {
            let start = rng.random_range(-10_000..10_000);
            let span = rng.random_range(0..=max_span);
            Interval::new(start, start + span, val)
        })
        .collect()
}

#[fixture]
fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

#[rstest]
#[case(1)]
#[case(50)]
#[case(5_000)]
fn test_matches_linear_scan_i64(mut rng: StdRng, #[case] max_span: i64) {
    let intervals = random_i64_intervals(&mut rng, 2_000, max_span);
    let index = IntervalIndex::build(intervals.clone());

    for _ in 0..500 {
        let start = rng.random_range(-12_000..12_000);
        let end = start + rng.random_range(0..500);
        assert_eq!(indexed(&index, start, end), naive(&intervals, start, end));
        assert_eq!(index.count(start, end), naive(&intervals, start, end).len());
    }
}

#[rstest]
fn test_matches_linear_scan_f64(mut rng: StdRng) {
    let intervals: Vec<Interval<f64, usize>> = (0..2_000)
        .map(|val| {
            let start: f64 = rng.random_range(-500.0..500.0);
            let span: f64 = rng.random_range(0.0..25.0);
            Interval::new(start, start + span, val)
        })
        .collect();
    let index = IntervalIndex::build(intervals.clone());

    for _ in 0..500 {
        let start: f64 = rng.random_range(-600.0..600.0);
        let end = start + rng.random_range(0.0..10.0);
        assert_eq!(indexed(&index, start, end), naive(&intervals, start, end));

        let mut point: Vec<usize> = index.find_point(start).into_iter().map(|iv| iv.val).collect();
        point.sort();
        assert_eq!(point, naive(&intervals, start, start));
    }
}

#[rstest]
fn test_matches_linear_scan_f64_mixed_magnitudes(mut rng: StdRng) {
    const TOP: f64 = 9007199254740992.0;
    let intervals: Vec<Interval<f64, usize>> = (0..2_000)
        .map(|val| {
            let start: f64 = match val % 4 {
                0 => rng.random_range(-1e-20..1e-20),
                1 => rng.random_range(-1.0..1.0) * 1e-12,
                2 => rng.random_range(0.0..4.0),
                _ => rng.random_range(1.0..1e6),
            };
            let end: f64 = match rng.random_range(0..3) {
                0 => 1.0,
                1 => TOP - rng.random_range(0.0..4.0),
                _ => start + rng.random_range(0.0..1e3),
            };
            Interval::new(start, end.max(start), val)
        })
        .collect();
    let index = IntervalIndex::build(intervals.clone());

    let mut queries = vec![0.0, 1.0, 1.0 + f64::EPSILON, 1e-20, TOP, TOP - 1.0, TOP - 2.5];
    for _ in 0..300 {
        queries.push(rng.random_range(-1.0..1e6));
    }

    for q in queries {
        assert_eq!(indexed(&index, q, q), naive(&intervals, q, q));
        assert_eq!(indexed(&index, q, q + 0.5), naive(&intervals, q, q + 0.5));
    }
}

#[rstest]
fn test_matches_linear_scan_u16_near_zero(mut rng: StdRng) {
    let intervals: Vec<Interval<u16, usize>> = (0..1_000)
        .map(|val| {
            let start = rng.random_range(0..200u16);
            let span = rng.random_range(0..300u16);
            Interval::new(start, start + span, val)
        })
        .collect();
    let index = IntervalIndex::build(intervals.clone());

    for start in 0..600u16 {
        assert_eq!(indexed(&index, start, start), naive(&intervals, start, start));
        assert_eq!(
            indexed(&index, start, start + 3),
            naive(&intervals, start, start + 3)
        );
    }
}

#[rstest]
fn test_matches_linear_scan_near_signed_minimum(mut rng: StdRng) {
    let intervals: Vec<Interval<i32, usize>> = (0..1_000)
        .map(|val| {
            let start = i32::MIN + rng.random_range(0..1_000);
            let span = rng.random_range(0..100);
            Interval::new(start, start + span, val)
        })
        .chain(std::iter::once(Interval::new(0, 1_000_000, 1_000)))
        .collect();
    let index = IntervalIndex::build(intervals.clone());

    for offset in 0..1_200 {
        let q = i32::MIN + offset;
        assert_eq!(indexed(&index, q, q), naive(&intervals, q, q));
    }
    assert_eq!(indexed(&index, 500, 500), vec![1_000]);
}

#[rstest]
fn test_widening_never_loses_results(mut rng: StdRng) {
    let intervals = random_i64_intervals(&mut rng, 1_000, 200);
    let index = IntervalIndex::build(intervals);

    for _ in 0..200 {
        let start = rng.random_range(-10_000..10_000);
        let end = start + rng.random_range(0..100);
        let narrow = indexed(&index, start, end);
        let wide = indexed(&index, start - 50, end + 50);
        assert!(narrow.iter().all(|v| wide.contains(v)));
    }
}

#[rstest]
fn test_results_have_no_false_positives_or_duplicates(mut rng: StdRng) {
    let intervals = random_i64_intervals(&mut rng, 1_000, 300);
    let index = IntervalIndex::build(intervals);

    for _ in 0..200 {
        let start = rng.random_range(-10_000..10_000);
        let end = start + rng.random_range(0..100);
        let hits = index.find(start, end);
        assert!(hits.iter().all(|iv| iv.overlap(start, end)));

        let mut vals: Vec<usize> = hits.iter().map(|iv| iv.val).collect();
        vals.sort();
        vals.dedup();
        assert_eq!(vals.len(), hits.len());
    }
}

#[rstest]
fn test_builds_are_deterministic(mut rng: StdRng) {
    let intervals = random_i64_intervals(&mut rng, 1_000, 100);
    let a = IntervalIndex::build(intervals.clone());
    let b = IntervalIndex::build(intervals);

    for q in (-10_000..10_000).step_by(97) {
        assert_eq!(indexed(&a, q, q + 10), indexed(&b, q, q + 10));
    }
}

#[rstest]
fn test_seek_matches_find_for_sorted_queries(mut rng: StdRng) {
    let intervals = random_i64_intervals(&mut rng, 2_000, 400);
    let index = IntervalIndex::build(intervals);

    let mut cursor = 0;
    for start in (-11_000..11_000).step_by(13) {
        let mut seeked: Vec<usize> = index
            .seek(start, start + 20, &mut cursor)
            .map(|iv| iv.val)
            .collect();
        seeked.sort();
        assert_eq!(seeked, indexed(&index, start, start + 20));
    }
}

#[rstest]
fn test_compat_tree_tracks_changes(mut rng: StdRng) {
    let intervals = random_i64_intervals(&mut rng, 500, 100);
    let mut tree: IntervalTree<i64, usize> = intervals.iter().cloned().collect();
    let mut reference = intervals;

    for round in 0..20 {
        let victim = round * 7;
        tree.remove(&victim);
        reference.retain(|iv| iv.val != victim);

        let start = rng.random_range(-10_000..10_000);
        tree.add(start, start + 5, 10_000 + round);
        reference.push(Interval::new(start, start + 5, 10_000 + round));

        let mut hits = tree.query_range(start - 100, start + 100);
        hits.sort();
        assert_eq!(hits, naive(&reference, start - 100, start + 100));
    }
}

/// A fixed-point coordinate in thousandths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Milli(i64);

impl Add for Milli {
    type Output = Milli;

    fn add(self, rhs: Milli) -> Milli {
        Milli(self.0 + rhs.0)
    }
}

impl Zero for Milli {
    fn zero() -> Self {
        Milli(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Coordinate for Milli {
    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn span(start: Self, end: Self) -> Self {
        Milli(i64::span(start.0, end.0))
    }

    fn pruned_start(self, max_span: Self) -> Self {
        Milli(self.0.pruned_start(max_span.0))
    }
}

#[rstest]
fn test_fixed_point_coordinates() {
    let index = IntervalIndex::build(vec![
        Interval::new(Milli(1_000), Milli(2_200), 1),
        Interval::new(Milli(2_000), Milli(2_500), 2),
        Interval::new(Milli(1_000), Milli(4_000), 3),
        Interval::new(Milli(4_000), Milli(5_000), 4),
        Interval::new(Milli(5_000), Milli(6_000), 5),
        Interval::new(Milli(6_000), Milli(20_000), 6),
    ]);

    let mut hits: Vec<i32> = index.find_point(Milli(4_000)).iter().map(|iv| iv.val).collect();
    hits.sort();
    assert_eq!(hits, vec![3, 4]);
    assert_eq!(index.upper_bound(), Milli(20_000));
}
