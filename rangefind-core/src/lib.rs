//! Core models for [rangefind](https://github.com/databio/rangefind).
//!
//! This crate holds the pieces every other rangefind crate agrees on:
//!
//! - [`models::Interval`]: a closed range `[start, end]` carrying a value, with the inclusive
//!   overlap and containment predicates.
//! - [`Coordinate`]: the numeric capability interval boundaries need (ordering, zero, and
//!   clamped span/pruning arithmetic), implemented for all primitive integers and floats.
//! - [`utils`]: readers that turn plain or gzip'd tab separated files into intervals.

pub mod coordinate;
pub mod errors;
pub mod models;
pub mod utils;

pub use self::coordinate::Coordinate;
