//! Logical-time utilities.
//!
//! Vector-clock types live in `time::vector` and are re-exported here.

pub mod vector;

// Re-export for convenience
pub use vector::*;
