//! Fast overlap queries against a fixed set of numeric intervals.
//!
//! This crate bundles the rangefind crates behind features:
//!
//! - `core` (default): [`rangefind_core`], the interval model and coordinate trait
//! - `index` (default): [`rangefind_index`], the overlap index and its async/compat wrappers
//! - `serde`: `Serialize`/`Deserialize` for intervals
//!
//! ```
//! use rangefind::index::{Interval, IntervalIndex, Overlapper};
//!
//! let index = IntervalIndex::build(vec![
//!     Interval { start: 1, end: 5, val: "a" },
//!     Interval { start: 5, end: 9, val: "b" },
//! ]);
//! assert_eq!(index.find_point(5).len(), 2);
//! ```

#[cfg(feature = "core")]
#[doc(inline)]
pub use rangefind_core as core;

#[cfg(feature = "index")]
#[doc(inline)]
pub use rangefind_index as index;
