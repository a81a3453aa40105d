//!
//! Thread-safe handle around a [`VectorClock`].
//!
//! A bare `VectorClock` needs `&mut` access to change, so it can only be
//! mutated by one owner at a time. When several threads or tasks act on
//! behalf of the same node, they share a [`SharedVectorClock`] instead.
//! Peers exchange owned snapshots, never live references.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::ClockError;
use crate::time::{PartialOrder, VectorClock};
use crate::types::Counter;

/// Cloneable, mutex-guarded vector clock. Clones share the same clock.
#[derive(Debug, Clone)]
pub struct SharedVectorClock {
    inner: Arc<Mutex<VectorClock>>,
}

impl SharedVectorClock {
    pub fn new(clock: VectorClock) -> Self {
        SharedVectorClock {
            inner: Arc::new(Mutex::new(clock)),
        }
    }

    /// Owner of the wrapped clock.
    pub fn owner(&self) -> String {
        self.inner.lock().owner().to_owned()
    }

    pub fn get(&self, node: &str) -> Option<Counter> {
        self.inner.lock().get(node)
    }

    /// See [`VectorClock::increment`].
    pub fn increment(&self) {
        self.inner.lock().increment();
    }

    /// See [`VectorClock::try_increment`].
    pub fn try_increment(&self) -> Result<Counter, ClockError> {
        self.inner.lock().try_increment()
    }

    /// Merges an owned snapshot of a peer's clock.
    pub fn merge(&self, peer: &VectorClock) -> Result<(), ClockError> {
        self.inner.lock().merge(peer)
    }

    /// Merges the current state of another shared clock.
    ///
    /// `other` is snapshotted before this clock is locked, so the two locks
    /// are never held together.
    pub fn merge_from(&self, other: &SharedVectorClock) -> Result<(), ClockError> {
        let peer = other.snapshot();
        self.merge(&peer)
    }

    /// Owned copy of the current clock.
    pub fn snapshot(&self) -> VectorClock {
        self.inner.lock().snapshot()
    }

    pub fn compare(&self, other: &VectorClock) -> PartialOrder {
        self.inner.lock().compare(other)
    }
}

impl From<VectorClock> for SharedVectorClock {
    fn from(clock: VectorClock) -> Self {
        SharedVectorClock::new(clock)
    }
}
