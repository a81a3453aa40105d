#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! vclock-core tracks causal ordering of events across a fixed set of nodes
//! with vector clocks.
//!
//! Each node owns one [`VectorClock`] built from the shared node list. The
//! owner calls [`VectorClock::increment`] for every causally relevant step and
//! [`VectorClock::merge`] whenever it receives a peer's clock. Merges between
//! clocks built from different node lists are rejected without touching the
//! receiver.
//!
//! ```
//! use vclock_core::{PartialOrder, VectorClock};
//!
//! let nodes = ["node1", "node2"];
//! let mut a = VectorClock::new(0, &nodes)?;
//! let mut b = VectorClock::new(1, &nodes)?;
//!
//! a.increment();
//! b.merge(&a.snapshot())?;
//! b.increment();
//!
//! assert_eq!(a.compare(&b), PartialOrder::LessThan);
//! # Ok::<(), vclock_core::ClockError>(())
//! ```

// Module for shared scalar types (NodeId, Counter).
pub mod types;

// Module for crate error types.
pub mod error;

// Module for logical clocks.
pub mod time;

// Module for the thread-safe clock handle.
pub mod sync;

pub use error::ClockError;
pub use sync::SharedVectorClock;
pub use time::{PartialOrder, VectorClock};
pub use types::{Counter, NodeId};
