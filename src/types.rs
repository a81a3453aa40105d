// Shared scalar types used across the clock modules.

/// Identifier of a participating node. Node sets are fixed when a clock is
/// constructed, so identifiers are plain owned strings.
pub type NodeId = String;

/// Per-node logical counter. Never negative, never decreases.
pub type Counter = u64;
