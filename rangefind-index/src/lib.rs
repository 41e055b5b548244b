//! Static interval overlap queries in Rust.
//!
//! This crate answers "which intervals overlap this query interval (or point)?" against a
//! collection of numeric ranges that is known up front. It is part of the
//! [rangefind](https://github.com/databio/rangefind) project.
//!
//! ## Features
//!
//! - **Fast overlap queries**: `O(log N + K)` lookups with a binary search bounded by the
//!   longest span in the dataset
//! - **Any numeric coordinate**: integers and floats out of the box, anything implementing
//!   [`Coordinate`](rangefind_core::Coordinate) otherwise
//! - **Iterator-based API**: Memory-efficient iteration over overlapping intervals
//! - **Cancellable async queries**: see [`stream`]
//! - **Thread-safe**: a built index is immutable and can be shared across threads
//!
//! ## Quick Start
//!
//! ```rust
//! use rangefind_index::{IntervalIndex, Overlapper, Interval};
//!
//! let intervals = vec![
//!     Interval { start: 100u32, end: 200, val: "gene1" },
//!     Interval { start: 150, end: 300, val: "gene2" },
//!     Interval { start: 400, end: 500, val: "gene3" },
//! ];
//!
//! let index = IntervalIndex::build(intervals);
//!
//! let overlaps = index.find(180, 250);
//! assert_eq!(overlaps.len(), 2); // gene1 and gene2 overlap
//!
//! // endpoints are inclusive
//! assert_eq!(index.find_point(300).len(), 1);
//!
//! // or use an iterator for memory-efficient processing
//! for interval in index.find_iter(180, 250) {
//!     println!("Found overlap: {:?}", interval);
//! }
//! ```
//!
//! ## Updating
//!
//! An [`IntervalIndex`] never changes after it is built. Build a new one when the data changes,
//! or use [`compat::IntervalTree`], which does exactly that on the next query after a change.

/// Interval index with max-span pruning.
///
/// See [`IntervalIndex`] for details.
pub mod index;

/// Cancellable asynchronous queries.
///
/// See [`stream::FindStream`] for details.
pub mod stream;

/// Mutable facade with add/remove support.
pub mod compat;

/// Core traits for overlap operations.
///
/// See [`Overlapper`] for the main trait.
pub mod traits;

pub mod errors;

// re-exports
pub use self::index::IntervalIndex;
pub use self::traits::{Interval, Overlapper};

/// Constants used throughout the crate.
pub mod consts {
    /// How many candidates a [`FindStream`](crate::stream::FindStream) scans between yields.
    pub const DEFAULT_YIELD_INTERVAL: usize = 64;
}
