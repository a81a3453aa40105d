//! Vector clock over a fixed set of nodes.
//!
//! A [`VectorClock`] is created once per node from the full node list and the
//! index of the owning node. The owner advances its own entry with
//! [`VectorClock::increment`] and folds in causal knowledge received from a
//! peer with [`VectorClock::merge`]. The clock is a plain value; see
//! [`crate::sync`] for a handle that can be shared across threads.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ClockError;
use crate::types::{Counter, NodeId};

/// Outcome of comparing two vector clocks in the causal partial order.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum PartialOrder {
    /// The left clock happened before the right one.
    LessThan,
    /// The right clock happened before the left one.
    GreaterThan,
    Equal,
    /// Neither clock dominates the other.
    Concurrent,
}

/// One node's view of logical time across the whole system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawVectorClock")]
pub struct VectorClock {
    owner: NodeId,
    counters: BTreeMap<NodeId, Counter>,
}

/// Wire shape accepted by `Deserialize`, validated through
/// [`VectorClock::from_counters`].
#[derive(Deserialize)]
struct RawVectorClock {
    owner: NodeId,
    counters: BTreeMap<NodeId, Counter>,
}

impl TryFrom<RawVectorClock> for VectorClock {
    type Error = ClockError;

    fn try_from(raw: RawVectorClock) -> Result<Self, Self::Error> {
        VectorClock::from_counters(raw.owner, raw.counters)
    }
}

impl VectorClock {
    /// Creates a zeroed clock for `nodes[owner_index]`.
    ///
    /// `nodes` must list every participant exactly once. Every clock in the
    /// same system should be built from the same node list.
    ///
    /// # Errors
    /// * [`ClockError::InvalidIndex`] if `owner_index >= nodes.len()`.
    /// * [`ClockError::DuplicateNode`] if a node identifier repeats.
    pub fn new<S: AsRef<str>>(owner_index: usize, nodes: &[S]) -> Result<Self, ClockError> {
        if owner_index >= nodes.len() {
            return Err(ClockError::InvalidIndex {
                index: owner_index,
                len: nodes.len(),
            });
        }

        let mut counters = BTreeMap::new();
        for node in nodes {
            let node = node.as_ref();
            if counters.insert(node.to_owned(), 0).is_some() {
                return Err(ClockError::DuplicateNode { node: node.to_owned() });
            }
        }

        Ok(VectorClock {
            owner: nodes[owner_index].as_ref().to_owned(),
            counters,
        })
    }

    /// Rebuilds a clock from an owner and an explicit counters mapping, e.g.
    /// a peer's clock decoded by a transport layer.
    ///
    /// # Errors
    /// [`ClockError::UnknownOwner`] if `owner` has no entry in `counters`.
    pub fn from_counters(
        owner: impl Into<NodeId>,
        counters: BTreeMap<NodeId, Counter>,
    ) -> Result<Self, ClockError> {
        let owner = owner.into();
        if !counters.contains_key(&owner) {
            return Err(ClockError::UnknownOwner { owner });
        }
        Ok(VectorClock { owner, counters })
    }

    /// The node this clock belongs to.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Counter for `node`, or `None` if the node is not part of this clock.
    pub fn get(&self, node: &str) -> Option<Counter> {
        self.counters.get(node).copied()
    }

    pub fn counters(&self) -> &BTreeMap<NodeId, Counter> {
        &self.counters
    }

    /// Iterates the node identifiers in a stable (sorted) order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.counters.keys().map(String::as_str)
    }

    /// Number of nodes tracked.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Always `false` for a constructed clock, which tracks at least its owner.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Owned copy to hand to a peer for merging.
    pub fn snapshot(&self) -> VectorClock {
        self.clone()
    }

    /// Records one causally relevant step on the owning node.
    ///
    /// A counter already at `u64::MAX` stays there; use
    /// [`VectorClock::try_increment`] to detect that case.
    pub fn increment(&mut self) {
        if self.try_increment().is_err() {
            tracing::warn!(node = %self.owner, "vector clock counter saturated");
        }
    }

    /// Like [`VectorClock::increment`], returning the owner's new counter.
    ///
    /// # Errors
    /// [`ClockError::CounterOverflow`] if the counter is at `u64::MAX`; the
    /// clock is left unchanged.
    pub fn try_increment(&mut self) -> Result<Counter, ClockError> {
        // `owner` is a key from construction onwards, so this never inserts.
        let counter = self.counters.entry(self.owner.clone()).or_insert(0);
        match counter.checked_add(1) {
            Some(next) => {
                *counter = next;
                Ok(next)
            }
            None => Err(ClockError::CounterOverflow {
                node: self.owner.clone(),
            }),
        }
    }

    /// Checks that `peer` tracks exactly the same node set.
    fn check_compatible(&self, peer: &VectorClock) -> Result<(), ClockError> {
        if self.counters.len() != peer.counters.len() {
            return Err(ClockError::LengthMismatch {
                ours: self.counters.len(),
                theirs: peer.counters.len(),
            });
        }
        // Equal lengths and every key of ours present in theirs: the key sets are equal.
        if let Some(node) = self.counters.keys().find(|node| !peer.counters.contains_key(*node)) {
            return Err(ClockError::KeyMismatch { node: node.clone() });
        }
        Ok(())
    }

    /// Folds `peer` into this clock, taking the elementwise maximum.
    ///
    /// The node sets are validated before any counter is touched, so on error
    /// this clock is unchanged. `peer` is never modified.
    ///
    /// # Errors
    /// * [`ClockError::LengthMismatch`] if the clocks track different numbers of nodes.
    /// * [`ClockError::KeyMismatch`] if they track different nodes.
    pub fn merge(&mut self, peer: &VectorClock) -> Result<(), ClockError> {
        if let Err(err) = self.check_compatible(peer) {
            tracing::debug!(owner = %self.owner, peer = %peer.owner, error = %err, "rejected vector clock merge");
            return Err(err);
        }

        for (node, counter) in self.counters.iter_mut() {
            // Presence checked above.
            if let Some(theirs) = peer.counters.get(node) {
                *counter = (*counter).max(*theirs);
            }
        }
        tracing::trace!(owner = %self.owner, peer = %peer.owner, clock = %self, "merged vector clock");
        Ok(())
    }

    /// Places `self` and `other` in the causal partial order.
    ///
    /// A node tracked by only one of the clocks counts as 0 on the other side.
    pub fn compare(&self, other: &VectorClock) -> PartialOrder {
        let mut self_le_other = true;
        let mut other_le_self = true;

        let all_nodes: BTreeSet<&NodeId> = self.counters.keys().chain(other.counters.keys()).collect();
        for node in all_nodes {
            let ours = self.counters.get(node).copied().unwrap_or(0);
            let theirs = other.counters.get(node).copied().unwrap_or(0);

            if ours > theirs {
                self_le_other = false;
            }
            if ours < theirs {
                other_le_self = false;
            }
        }

        match (self_le_other, other_le_self) {
            (true, true) => PartialOrder::Equal,
            (true, false) => PartialOrder::LessThan,
            (false, true) => PartialOrder::GreaterThan,
            (false, false) => PartialOrder::Concurrent,
        }
    }

    /// `true` if every counter of `self` is <= the matching counter of `other`
    /// and at least one is strictly smaller.
    pub fn happens_before(&self, other: &VectorClock) -> bool {
        self.compare(other) == PartialOrder::LessThan
    }

    pub fn is_concurrent(&self, other: &VectorClock) -> bool {
        self.compare(other) == PartialOrder::Concurrent
    }

    /// `true` if `self` is elementwise >= `other` (equal clocks dominate each other).
    pub fn dominates(&self, other: &VectorClock) -> bool {
        matches!(self.compare(other), PartialOrder::GreaterThan | PartialOrder::Equal)
    }
}

impl fmt::Display for VectorClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (node, counter)) in self.counters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", node, counter)?;
        }
        write!(f, "}}")
    }
}
