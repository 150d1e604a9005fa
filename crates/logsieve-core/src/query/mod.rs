//! Query evaluation for logsieve.
//!
//! Filtering and sorting are pure functions over record slices. The
//! [`crate::session`] module chains them and caches the result.

mod filter;
mod sort;

pub use filter::FilterEvaluator;
pub use sort::{compare_records, sort_indices, sort_records};
