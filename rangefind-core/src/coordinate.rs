use std::cmp::Ordering;
use std::fmt::Debug;

use num_traits::Zero;

/// A numeric type that can be used as the boundary of an [`Interval`](crate::models::Interval).
///
/// Coordinates need a total order for sorting, the usual comparison operators for the overlap
/// predicate, an additive identity, and two pieces of arithmetic that must never wrap:
///
/// * [`span`](Coordinate::span) - the length `end - start` of a single interval.
/// * [`pruned_start`](Coordinate::pruned_start) - a query start moved left by the longest span
///   in a dataset.
///
/// Implementations are provided for every primitive integer and float. Integer implementations
/// saturate at the type limits, so an `i8` interval `[-128, 127]` has a span of `127`. A span
/// stuck at the type maximum turns pruning off entirely (the pruned start is the type minimum),
/// since the real span may have been longer.
///
/// Fixed-point or decimal types can opt in by implementing the trait themselves:
///
/// ```
/// use std::cmp::Ordering;
/// use std::ops::Add;
///
/// use num_traits::Zero;
/// use rangefind_core::Coordinate;
///
/// /// Money in hundredths of a unit.
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
/// struct Cents(i64);
///
/// impl Add for Cents {
///     type Output = Cents;
///     fn add(self, rhs: Cents) -> Cents {
///         Cents(self.0 + rhs.0)
///     }
/// }
///
/// impl Zero for Cents {
///     fn zero() -> Self {
///         Cents(0)
///     }
///     fn is_zero(&self) -> bool {
///         self.0 == 0
///     }
/// }
///
/// impl Coordinate for Cents {
///     fn total_cmp(&self, other: &Self) -> Ordering {
///         self.cmp(other)
///     }
///     fn span(start: Self, end: Self) -> Self {
///         Cents(i64::span(start.0, end.0))
///     }
///     fn pruned_start(self, max_span: Self) -> Self {
///         Cents(self.0.pruned_start(max_span.0))
///     }
/// }
///
/// assert_eq!(Cents::span(Cents(150), Cents(400)), Cents(250));
/// ```
pub trait Coordinate: Copy + PartialOrd + Zero + Debug + Send + Sync {
    /// Total order used to sort intervals. For floats this is IEEE 754 `totalOrder`.
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// `end - start`, clamped to zero when `end < start` and to the type maximum on overflow.
    ///
    /// Must never be shorter than the exact difference, otherwise pruning can skip matches.
    /// Float implementations round inexact results up by one ulp.
    fn span(start: Self, end: Self) -> Self;

    /// `self - max_span`, clamped to the type minimum instead of wrapping.
    fn pruned_start(self, max_span: Self) -> Self;
}

macro_rules! impl_coordinate_int {
    ($($t:ty),*) => {
        $(
            impl Coordinate for $t {
                #[inline]
                fn total_cmp(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }

                #[inline]
                fn span(start: Self, end: Self) -> Self {
                    if end > start {
                        end.saturating_sub(start)
                    } else {
                        0
                    }
                }

                // a saturated span may be shorter than the real one, so nothing can be pruned
                #[inline]
                fn pruned_start(self, max_span: Self) -> Self {
                    if max_span == <$t>::MAX {
                        <$t>::MIN
                    } else {
                        self.saturating_sub(max_span)
                    }
                }
            }
        )*
    };
}

macro_rules! impl_coordinate_float {
    ($($t:ty),*) => {
        $(
            impl Coordinate for $t {
                #[inline]
                fn total_cmp(&self, other: &Self) -> Ordering {
                    <$t>::total_cmp(self, other)
                }

                // rounded up to the next float when the subtraction is inexact, so the span is
                // never shorter than the real one
                #[inline]
                fn span(start: Self, end: Self) -> Self {
                    if end <= start {
                        return 0.0;
                    }
                    let diff = end - start;
                    if !diff.is_finite() {
                        return diff;
                    }
                    // two-sum error term of end + (-start)
                    let back = diff - end;
                    let err = (end - (diff - back)) + (-start - back);
                    if err > 0.0 {
                        <$t>::from_bits(diff.to_bits() + 1)
                    } else {
                        diff
                    }
                }

                // with span never short, round to nearest keeps self - max_span at or below any
                // start that could still overlap, the worst case is -inf
                #[inline]
                fn pruned_start(self, max_span: Self) -> Self {
                    self - max_span
                }
            }
        )*
    };
}

impl_coordinate_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_coordinate_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0u32, 10u32, 10u32)]
    #[case(10u32, 10u32, 0u32)]
    #[case(10u32, 0u32, 0u32)]
    #[case(0u32, u32::MAX, u32::MAX)]
    fn test_unsigned_span(#[case] start: u32, #[case] end: u32, #[case] expected: u32) {
        assert_eq!(u32::span(start, end), expected);
    }

    #[rstest]
    #[case(-10i32, -5i32, 5i32)]
    #[case(-5i32, -10i32, 0i32)]
    #[case(i32::MIN, i32::MAX, i32::MAX)]
    #[case(i32::MIN, 0, i32::MAX)]
    fn test_signed_span_saturates(#[case] start: i32, #[case] end: i32, #[case] expected: i32) {
        assert_eq!(i32::span(start, end), expected);
    }

    #[rstest]
    fn test_pruned_start_does_not_wrap() {
        assert_eq!(3u8.pruned_start(10), 0);
        assert_eq!((-100i8).pruned_start(127), i8::MIN);
        assert_eq!(i64::MIN.pruned_start(1), i64::MIN);
        assert_eq!(5i64.pruned_start(10), -5);
        assert_eq!(127i8.pruned_start(i8::MAX), i8::MIN);
        assert_eq!(200u8.pruned_start(u8::MAX), 0);
    }

    #[rstest]
    fn test_float_coordinates() {
        assert_eq!(f64::span(1.0, 2.5), 1.5);
        assert_eq!(f64::span(2.5, 1.0), 0.0);
        assert_eq!((-7.0f64).pruned_start(5.0), -12.0);
        assert_eq!(Coordinate::total_cmp(&-0.0f64, &0.0), Ordering::Less);
    }

    #[rstest]
    #[case(-1e-20, 1.0)]
    #[case(1.5, 9007199254740992.0)]
    #[case(0.1, 0.7)]
    #[case(-3.3e-9, 123_456.789)]
    #[case(-f64::MAX, f64::MAX)]
    fn test_float_span_never_short(#[case] start: f64, #[case] end: f64) {
        let span = f64::span(start, end);
        assert!(span >= end - start);
        // the pruned start of a query at `end` must still reach back to `start`
        assert!(end.pruned_start(span) <= start);
    }

    #[rstest]
    fn test_float_span_rounds_up_when_inexact() {
        assert_eq!(f64::span(-1e-20, 1.0), 1.0 + f64::EPSILON);
        assert_eq!(f64::span(1.5, 9007199254740992.0), 9007199254740991.0);
        assert_eq!(f32::span(-1e-10, 1.0), 1.0 + f32::EPSILON);
        assert!(1.0f32.pruned_start(f32::span(-1e-10, 1.0)) <= -1e-10);
        // exact differences are left alone
        assert_eq!(f64::span(0.25, 4.75), 4.5);
        assert_eq!(f32::span(-2.0, 6.0), 8.0);
    }
}
