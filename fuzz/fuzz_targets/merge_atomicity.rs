#![no_main]

// Harness: merge_atomicity - a merge either succeeds with the elementwise max
// or fails with the receiver untouched; counters never decrease.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;
use vclock_core::VectorClock;

#[derive(Arbitrary, Debug, Clone)]
struct ClockFrame {
    owner: String,
    entries: Vec<(String, u64)>,
}

impl ClockFrame {
    fn build(&self) -> Option<VectorClock> {
        let mut counters: BTreeMap<String, u64> = self.entries.iter().cloned().collect();
        counters.entry(self.owner.clone()).or_insert(0);
        VectorClock::from_counters(self.owner.clone(), counters).ok()
    }
}

#[derive(Arbitrary, Debug)]
struct MergeFrame {
    local: ClockFrame,
    peer: ClockFrame,
    increments: u8,
}

fuzz_target!(|frame: MergeFrame| {
    let (Some(mut local), Some(peer)) = (frame.local.build(), frame.peer.build()) else {
        return;
    };
    for _ in 0..frame.increments {
        local.increment();
    }

    let before = local.snapshot();
    match local.merge(&peer) {
        Ok(()) => {
            for (node, value) in before.counters() {
                let theirs = peer.get(node).expect("merged clocks share nodes");
                assert_eq!(local.get(node), Some((*value).max(theirs)));
            }
        }
        Err(_) => assert_eq!(local, before),
    }
});
