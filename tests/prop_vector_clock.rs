use proptest::prelude::*;
use std::collections::BTreeMap;
use vclock_core::{ClockError, Counter, NodeId, PartialOrder, VectorClock};

const NODES: [&str; 4] = ["alpha", "beta", "gamma", "delta"];

// Counters kept well below u64::MAX so increments never saturate.
fn arb_counters() -> impl Strategy<Value = BTreeMap<NodeId, Counter>> {
    prop::array::uniform4(0u64..1_000).prop_map(|values| {
        NODES.iter().map(|n| n.to_string()).zip(values).collect()
    })
}

fn arb_clock() -> impl Strategy<Value = VectorClock> {
    (0..NODES.len(), arb_counters())
        .prop_map(|(owner, counters)| VectorClock::from_counters(NODES[owner], counters).unwrap())
}

#[derive(Debug, Clone)]
enum Step {
    Increment,
    Merge(VectorClock),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![Just(Step::Increment), arb_clock().prop_map(Step::Merge)]
}

fn pointwise_ge(a: &VectorClock, b: &VectorClock) -> bool {
    b.counters().iter().all(|(node, v)| a.get(node).unwrap_or(0) >= *v)
}

proptest! {
    #[test]
    fn prop_counters_never_decrease(start in arb_clock(), steps in prop::collection::vec(arb_step(), 0..20)) {
        let mut vc = start;
        for step in steps {
            let before = vc.snapshot();
            match step {
                Step::Increment => vc.increment(),
                Step::Merge(peer) => vc.merge(&peer).unwrap(),
            }
            prop_assert!(pointwise_ge(&vc, &before));
        }
    }

    #[test]
    fn prop_merge_with_own_snapshot_is_noop(mut vc in arb_clock()) {
        let copy = vc.snapshot();
        vc.merge(&copy).unwrap();
        prop_assert_eq!(vc, copy);
    }

    #[test]
    fn prop_merge_result_is_exact_max(mut a in arb_clock(), b in arb_clock()) {
        let before = a.snapshot();
        a.merge(&b).unwrap();

        prop_assert!(a.dominates(&before));
        prop_assert!(a.dominates(&b));
        for node in NODES {
            let expected = before.get(node).unwrap().max(b.get(node).unwrap());
            prop_assert_eq!(a.get(node), Some(expected));
        }
        prop_assert_eq!(a.owner(), before.owner());
    }

    #[test]
    fn prop_merge_order_does_not_matter(a in arb_clock(), b in arb_clock()) {
        let mut ab = a.clone();
        ab.merge(&b).unwrap();
        let mut ba = b.clone();
        ba.merge(&a).unwrap();
        prop_assert_eq!(ab.counters(), ba.counters());
    }

    #[test]
    fn prop_failed_merge_leaves_receiver_unchanged(
        mut vc in arb_clock(),
        extra in "[a-z]{1,6}_x",
        drop_one in any::<bool>(),
    ) {
        let before = vc.snapshot();
        let mut counters = vc.counters().clone();
        if drop_one {
            // Same cardinality, different node set.
            counters.remove("delta");
        }
        counters.insert(extra.clone(), 5);
        let peer = VectorClock::from_counters(extra, counters).unwrap();

        let result = vc.merge(&peer);
        if drop_one {
            prop_assert_eq!(result, Err(ClockError::KeyMismatch { node: "delta".into() }));
        } else {
            prop_assert_eq!(result, Err(ClockError::LengthMismatch { ours: 4, theirs: 5 }));
        }
        prop_assert_eq!(vc, before);
    }

    #[test]
    fn prop_construction_bounds(index in 0usize..10) {
        let result = VectorClock::new(index, &NODES);
        if index < NODES.len() {
            let vc = result.unwrap();
            prop_assert_eq!(vc.owner(), NODES[index]);
            prop_assert!(vc.counters().values().all(|v| *v == 0));
            prop_assert_eq!(vc.len(), NODES.len());
        } else {
            prop_assert_eq!(result, Err(ClockError::InvalidIndex { index, len: NODES.len() }));
        }
    }

    #[test]
    fn prop_increment_changes_only_owner(mut vc in arb_clock()) {
        let before = vc.snapshot();
        vc.increment();
        for node in NODES {
            let expected = if node == vc.owner() {
                before.get(node).unwrap() + 1
            } else {
                before.get(node).unwrap()
            };
            prop_assert_eq!(vc.get(node), Some(expected));
        }
        prop_assert!(before.happens_before(&vc));
    }

    #[test]
    fn prop_receive_then_increment_happens_after(sender in arb_clock(), mut receiver in arb_clock()) {
        receiver.merge(&sender).unwrap();
        receiver.increment();
        prop_assert_eq!(sender.compare(&receiver), PartialOrder::LessThan);
        prop_assert_eq!(receiver.compare(&sender), PartialOrder::GreaterThan);
    }

    #[test]
    fn prop_compare_is_antisymmetric(a in arb_clock(), b in arb_clock()) {
        let expected = match a.compare(&b) {
            PartialOrder::LessThan => PartialOrder::GreaterThan,
            PartialOrder::GreaterThan => PartialOrder::LessThan,
            other => other,
        };
        prop_assert_eq!(b.compare(&a), expected);
    }
}
