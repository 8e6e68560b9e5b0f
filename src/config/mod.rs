//! Configuration constants for the storage engine.
//!
//! See [`constants`] for the full dependency graph between values.

mod constants;

pub use constants::*;
