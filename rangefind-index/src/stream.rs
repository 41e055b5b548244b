//! Cancellable, lazily evaluated overlap queries.
//!
//! A [`FindStream`] runs the same binary search and forward scan as
//! [`IntervalIndex::find_iter`](crate::Overlapper::find_iter), but hands out one match per
//! `.await`. Before every candidate it checks a [`CancellationToken`], and every
//! `yield_interval` candidates it gives the executor a chance to run other tasks, so a very wide
//! scan can be aborted from elsewhere without draining it.
//!
//! ```
//! use rangefind_index::{IntervalIndex, Overlapper, Interval};
//! use rangefind_index::stream::CancellationToken;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let index = IntervalIndex::build(vec![
//!     Interval { start: 0u32, end: 10, val: "a" },
//!     Interval { start: 5, end: 15, val: "b" },
//! ]);
//!
//! let token = CancellationToken::new();
//! let mut stream = index.find_stream(8, 9, token.clone());
//!
//! let first = stream.next().await.unwrap().unwrap();
//! assert_eq!(first.val, "a");
//!
//! token.cancel();
//! assert!(stream.next().await.unwrap().is_err());
//! assert!(stream.next().await.is_none());
//! # });
//! ```
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::trace;

use rangefind_core::Coordinate;
use rangefind_core::models::Interval;

use crate::consts::DEFAULT_YIELD_INTERVAL;
use crate::errors::Cancelled;
use crate::index::IntervalIndex;

/// A shared flag used to abort a running [`FindStream`].
///
/// Clones share the same flag, so one clone can be handed to the stream and another kept by
/// whoever decides to stop it. Once raised the flag stays raised.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Every stream holding a clone of this token fails on its next step.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// A lazy, cancellable sequence of intervals overlapping a query.
///
/// Created by [`IntervalIndex::find_stream`] and [`IntervalIndex::find_point_stream`].
///
/// [`next`](FindStream::next) resolves to:
/// * `Some(Ok(interval))` for each match,
/// * `Some(Err(Cancelled))` once if the token was raised before the scan finished,
/// * `None` when the scan is over (after exhaustion or after cancellation).
///
/// The stream cannot be restarted; issue a new query to run it again. Dropping it half way is
/// fine, it only borrows the index.
#[derive(Debug)]
pub struct FindStream<'a, N, T>
where
    N: Coordinate,
    T: Clone + Send + Sync + 'a,
{
    inner: &'a IntervalIndex<N, T>,
    off: usize,
    start: N,
    stop: N,
    token: CancellationToken,
    yield_interval: usize,
    scanned: usize,
    done: bool,
}

impl<'a, N, T> FindStream<'a, N, T>
where
    N: Coordinate,
    T: Clone + Send + Sync + 'a,
{
    fn new(inner: &'a IntervalIndex<N, T>, start: N, stop: N, token: CancellationToken) -> Self {
        let pruned = start.pruned_start(inner.max_span());
        let off = IntervalIndex::first_candidate(pruned, inner.intervals());
        FindStream {
            inner,
            off,
            start,
            stop,
            token,
            yield_interval: DEFAULT_YIELD_INTERVAL,
            scanned: 0,
            done: false,
        }
    }

    /// Yield to the executor after every `interval` scanned candidates instead of the default.
    /// Zero is treated as one.
    pub fn with_yield_interval(mut self, interval: usize) -> Self {
        self.yield_interval = interval.max(1);
        self
    }

    /// Number of candidates looked at so far, matching or not.
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Advance the scan to the next matching interval.
    pub async fn next(&mut self) -> Option<Result<&'a Interval<N, T>, Cancelled>> {
        let intervals = self.inner.intervals();

        while !self.done && self.off < intervals.len() {
            if self.scanned > 0 && self.scanned % self.yield_interval == 0 {
                tokio::task::yield_now().await;
            }

            if self.token.is_cancelled() {
                trace!(
                    "Interval stream cancelled after scanning {} candidates",
                    self.scanned
                );
                self.done = true;
                return Some(Err(Cancelled));
            }

            let interval = &intervals[self.off];
            self.off += 1;
            self.scanned += 1;

            if interval.start > self.stop {
                break;
            } else if interval.overlap(self.start, self.stop) {
                return Some(Ok(interval));
            }
        }

        self.done = true;
        None
    }

    /// Drain the stream into a vector, or fail if it gets cancelled on the way.
    pub async fn try_collect(mut self) -> Result<Vec<&'a Interval<N, T>>, Cancelled> {
        let mut hits = Vec::new();
        while let Some(hit) = self.next().await {
            hits.push(hit?);
        }
        Ok(hits)
    }
}

impl<N, T> IntervalIndex<N, T>
where
    N: Coordinate,
    T: Clone + Send + Sync,
{
    /// Stream all intervals overlapping start ..= stop, checking `token` before each candidate.
    pub fn find_stream(&self, start: N, stop: N, token: CancellationToken) -> FindStream<'_, N, T> {
        FindStream::new(self, start, stop, token)
    }

    /// Stream all intervals containing `point`. Same as `find_stream(point, point, token)`.
    pub fn find_point_stream(&self, point: N, token: CancellationToken) -> FindStream<'_, N, T> {
        FindStream::new(self, point, point, token)
    }
}
