//! Randomized properties the kernel and tree algebra MUST satisfy.
//!
//! Stamps are generated by running random kernel-op scripts from the
//! seed, so every tested stamp is kernel-reachable and identities stay
//! disjoint by construction. Inflations that go through the growth
//! fallback are asserted through order properties, never byte-exact
//! shapes.

use proptest::prelude::*;
use treeclock_core::{EventTree, Lattice, Stamp};

/// Canonical event trees, built bottom-up through the normalizing
/// constructor.
fn event_trees() -> impl Strategy<Value = EventTree> {
    let leaf = (0u64..40).prop_map(EventTree::leaf);
    leaf.prop_recursive(4, 48, 2, |inner| {
        (0u64..8, inner.clone(), inner).prop_map(|(n, l, r)| EventTree::node(n, l, r))
    })
}

/// Arbitrary raw trees, canonical or not, using the bare variants.
fn raw_event_trees() -> impl Strategy<Value = EventTree> {
    let leaf = (0u64..8).prop_map(EventTree::Leaf);
    leaf.prop_recursive(4, 48, 2, |inner| {
        (0u64..8, inner.clone(), inner)
            .prop_map(|(n, l, r)| EventTree::Node(n, Box::new(l), Box::new(r)))
    })
}

/// Interpret a script of (op, target) byte pairs against a pool of
/// stamps that starts as the lone seed.
fn run_script(script: &[(u8, u8)]) -> Vec<Stamp> {
    let mut pool = vec![Stamp::seed()];
    for &(op, target) in script {
        let i = target as usize % pool.len();
        match op % 4 {
            0 => {
                let (a, b) = pool[i].fork();
                pool[i] = a;
                pool.push(b);
            }
            1 => pool[i] = pool[i].event(),
            2 => {
                if pool.len() > 1 {
                    let j = (i + 1) % pool.len();
                    let merged = pool[i].join(&pool[j]).expect("kernel ids stay disjoint");
                    pool[i] = merged;
                    pool.remove(j);
                }
            }
            _ => {
                let j = (i + 1) % pool.len();
                let (next, message) = pool[j].send();
                pool[j] = next;
                pool[i] = pool[i]
                    .receive(&message)
                    .expect("message stamps are anonymous");
            }
        }
    }
    pool
}

fn scripts() -> impl Strategy<Value = Vec<(u8, u8)>> {
    proptest::collection::vec((any::<u8>(), any::<u8>()), 0..24)
}

/// Absolute tick count at one point of the interval, following `path`
/// bits (false = left half) deeper than any generated tree.
fn value_at(e: &EventTree, path: u8) -> u64 {
    match e {
        EventTree::Leaf(n) => *n,
        EventTree::Node(n, l, r) => {
            let child = if path & 1 == 0 { l } else { r };
            n + value_at(child, path >> 1)
        }
    }
}

fn stamps() -> impl Strategy<Value = Stamp> {
    (scripts(), any::<u8>()).prop_map(|(script, pick)| {
        let pool = run_script(&script);
        pool[pick as usize % pool.len()].clone()
    })
}

/// Two stamps with disjoint identities from the same kernel run.
fn disjoint_pairs() -> impl Strategy<Value = (Stamp, Stamp)> {
    scripts().prop_map(|script| {
        let mut pool = run_script(&script);
        if pool.len() < 2 {
            return pool[0].fork();
        }
        let b = pool.pop().expect("pool has two stamps");
        let a = pool.pop().expect("pool has two stamps");
        (a, b)
    })
}

proptest! {
    #[test]
    fn kernel_results_are_canonical(s in stamps()) {
        prop_assert!(s.id().is_normal());
        prop_assert!(s.event_tree().is_normal());
        prop_assert_eq!(&s.id().normalize(), s.id());
        prop_assert_eq!(&s.event_tree().normalize(), s.event_tree());
    }

    #[test]
    fn normalization_is_idempotent_and_value_preserving(e in raw_event_trees()) {
        let norm = e.normalize();
        prop_assert!(norm.is_normal());
        prop_assert_eq!(norm.normalize(), norm.clone());
        // The canonical tree counts the same ticks at every point.
        for path in 0..=u8::MAX {
            prop_assert_eq!(value_at(&e, path), value_at(&norm, path));
        }
    }

    #[test]
    fn equal_histories_have_equal_structure(a in event_trees(), b in event_trees()) {
        if a.leq(&b) && b.leq(&a) {
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn fork_partitions_identity_and_shares_history(s in stamps()) {
        let (a, b) = s.fork();
        prop_assert_eq!(&a.id().sum(b.id()).expect("fork halves are disjoint"), s.id());
        prop_assert_eq!(a.event_tree(), s.event_tree());
        prop_assert_eq!(b.event_tree(), s.event_tree());
    }

    #[test]
    fn fork3_and_fork4_partition_identity(s in stamps()) {
        let (a, b, c) = s.fork3();
        let total = a.id().sum(b.id()).and_then(|t| t.sum(c.id()));
        prop_assert_eq!(&total.expect("fork3 parts are disjoint"), s.id());

        let (a, b, c, d) = s.fork4();
        let total = a
            .id()
            .sum(b.id())
            .and_then(|t| t.sum(c.id()))
            .and_then(|t| t.sum(d.id()));
        prop_assert_eq!(&total.expect("fork4 parts are disjoint"), s.id());
    }

    #[test]
    fn peek_strips_identity_only(s in stamps()) {
        let p = s.peek();
        prop_assert!(p.is_anonymous());
        prop_assert_eq!(p.event_tree(), s.event_tree());
    }

    #[test]
    fn event_inflates_strictly(s in stamps()) {
        let next = s.event();
        prop_assert!(s.event_tree().leq(next.event_tree()));
        prop_assert!(!next.event_tree().leq(s.event_tree()));
        prop_assert!(next.event_tree().is_normal());
    }

    #[test]
    fn event_on_anonymous_is_identity(s in stamps()) {
        let p = s.peek();
        prop_assert_eq!(p.event(), p);
    }

    #[test]
    fn join_is_commutative(a in event_trees(), b in event_trees()) {
        prop_assert_eq!(a.join(&b), b.join(&a));
    }

    #[test]
    fn join_is_associative(a in event_trees(), b in event_trees(), c in event_trees()) {
        prop_assert_eq!(a.join(&b).join(&c), a.join(&b.join(&c)));
    }

    #[test]
    fn join_is_idempotent(a in event_trees()) {
        prop_assert_eq!(a.join(&a), a);
    }

    #[test]
    fn bottom_is_join_identity(a in event_trees()) {
        let bottom = EventTree::bottom();
        prop_assert_eq!(&a.join(&bottom), &a);
        prop_assert_eq!(&bottom.join(&a), &a);
    }

    #[test]
    fn join_is_least_upper_bound(
        a in event_trees(),
        b in event_trees(),
        extra in event_trees(),
    ) {
        let joined = a.join(&b);
        prop_assert!(a.leq(&joined));
        prop_assert!(b.leq(&joined));
        // Any other upper bound sits at or above the join.
        let upper = joined.join(&extra);
        prop_assert!(a.leq(&upper) && b.leq(&upper));
        prop_assert!(joined.leq(&upper));
    }

    #[test]
    fn leq_agrees_with_join_derived_order(a in event_trees(), b in event_trees()) {
        // The lattice law: the direct path-offset comparison must match
        // the order the join induces.
        prop_assert_eq!(a.leq(&b), a.join(&b) == b);
    }

    #[test]
    fn send_receive_links_histories((a, b) in disjoint_pairs()) {
        let (a_next, message) = a.send();
        let b_next = b.receive(&message).expect("message is anonymous");
        prop_assert!(message.leq(&b_next));
        prop_assert!(b_next.dominates(&message));

        let merged = a_next.join(&b_next).expect("ids stay disjoint");
        let settled = merged.receive(&message).expect("message is anonymous");
        prop_assert!(a_next.leq(&settled));
        prop_assert!(b_next.leq(&settled));
    }

    #[test]
    fn concurrency_is_symmetric_and_excludes_order((a, b) in disjoint_pairs()) {
        let a = a.event();
        let b = b.event();
        prop_assert_eq!(a.concurrent(&b), b.concurrent(&a));
        if a.concurrent(&b) {
            prop_assert!(!a.leq(&b) && !b.leq(&a));
            prop_assert!(!a.dominates(&b) && !b.dominates(&a));
        }
    }

    #[test]
    fn text_roundtrips_canonical_values(s in stamps()) {
        let printed = s.to_string();
        prop_assert_eq!(printed.parse::<Stamp>().expect("printer emits canonical form"), s);
    }

    #[test]
    fn event_tree_text_roundtrips(e in event_trees()) {
        let printed = e.to_string();
        prop_assert_eq!(printed.parse::<EventTree>().expect("printer emits canonical form"), e);
    }

    #[test]
    fn serde_roundtrips_stamps(s in stamps()) {
        let json = serde_json::to_string(&s).expect("stamps serialize");
        let back: Stamp = serde_json::from_str(&json).expect("stamps deserialize");
        prop_assert_eq!(back, s);
    }
}
