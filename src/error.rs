//!
//! Defines error types for vector clock construction and merging.

use crate::types::NodeId;

/// Errors returned by [`VectorClock`](crate::VectorClock) operations.
/// None of them are fatal; a failed operation leaves the clock untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// The owner index does not point into the node list.
    #[error("owner index invalid: expected between 0 and {len}, got {index}")]
    InvalidIndex { index: usize, len: usize },
    /// The node list names the same node more than once.
    #[error("node {node} appears more than once in the node list")]
    DuplicateNode { node: NodeId },
    /// The owner of a reconstructed clock has no counter of its own.
    #[error("owner {owner} is not one of the clock's nodes")]
    UnknownOwner { owner: NodeId },
    /// The two clocks track a different number of nodes.
    #[error("vector clocks differ in length: ours {ours}, theirs {theirs}")]
    LengthMismatch { ours: usize, theirs: usize },
    /// The two clocks track the same number of nodes but not the same nodes.
    #[error("vector clocks differ in contents: found {node} in ours but not in theirs")]
    KeyMismatch { node: NodeId },
    /// The owner's counter is already at its maximum value.
    #[error("counter for node {node} cannot be incremented past its maximum value")]
    CounterOverflow { node: NodeId },
}
