use thiserror::Error;

/// Errors raised while building an [`IntervalIndex`](crate::IntervalIndex).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    /// The parallel coordinate and value columns had different lengths.
    #[error("Parallel inputs differ in length: starts={starts}, ends={ends}, values={values}")]
    LengthMismatch {
        starts: usize,
        ends: usize,
        values: usize,
    },
}

/// Returned by a [`FindStream`](crate::stream::FindStream) whose
/// [`CancellationToken`](crate::stream::CancellationToken) was raised mid-scan.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Interval query was cancelled")]
pub struct Cancelled;
