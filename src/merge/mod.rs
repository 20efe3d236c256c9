//! Shallow merging of state values.
//!
//! A store never edits its current snapshot. Every update builds a new value
//! by merging a partial update on top of the previous one, and that new value
//! becomes the next snapshot.

mod merge;

pub use merge::{JsonState, Merge};
