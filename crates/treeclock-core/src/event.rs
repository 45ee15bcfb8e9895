//! Event trees: per-region inflation counts over the unit interval.
//!
//! A leaf `n` says every point of the current interval has been inflated
//! at least `n` times. A node `(n, l, r)` charges `n` base ticks to the
//! whole interval plus relative ticks per half, so the absolute count at
//! any point is the sum of the counters along its path. Histories merge
//! by pointwise max, which makes event trees a join-semilattice.

use crate::lattice::Lattice;
use serde::{Deserialize, Serialize};

/// A causal history in canonical form.
///
/// Canonical means no node has two equal leaf children (they fold into
/// the base counter) and every node's children have a common minimum of
/// zero (the surplus lifts into the base). Build interior nodes through
/// [`EventTree::node`] and the invariant holds by construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTree {
    /// Every point of the current interval counts at least `n` ticks.
    Leaf(u64),
    /// Base ticks for the whole interval plus relative subtrees per half.
    Node(u64, Box<EventTree>, Box<EventTree>),
}

impl EventTree {
    /// A uniform history of `n` ticks.
    pub fn leaf(n: u64) -> Self {
        EventTree::Leaf(n)
    }

    /// Build an interior node in canonical form: equal leaf children fold
    /// into the base counter, and the children's common minimum lifts
    /// into the base.
    pub fn node(n: u64, left: EventTree, right: EventTree) -> Self {
        match (&left, &right) {
            (EventTree::Leaf(a), EventTree::Leaf(b)) if a == b => EventTree::Leaf(n + a),
            _ => {
                let m = left.min_value().min(right.min_value());
                EventTree::Node(n + m, Box::new(left.sink(m)), Box::new(right.sink(m)))
            }
        }
    }

    /// The root counter. For a canonical tree this is the minimum
    /// absolute count over the interval.
    pub fn min_value(&self) -> u64 {
        match self {
            EventTree::Leaf(n) | EventTree::Node(n, _, _) => *n,
        }
    }

    /// The maximum absolute count over the interval.
    pub fn max_value(&self) -> u64 {
        match self {
            EventTree::Leaf(n) => *n,
            EventTree::Node(n, l, r) => n + l.max_value().max(r.max_value()),
        }
    }

    /// Add `m` ticks to the root counter.
    pub fn lift(&self, m: u64) -> EventTree {
        match self {
            EventTree::Leaf(n) => EventTree::Leaf(n + m),
            EventTree::Node(n, l, r) => EventTree::Node(n + m, l.clone(), r.clone()),
        }
    }

    /// Subtract `m` ticks from the root counter. Callers uphold
    /// `m <= self.min_value()`.
    pub fn sink(&self, m: u64) -> EventTree {
        match self {
            EventTree::Leaf(n) => EventTree::Leaf(n - m),
            EventTree::Node(n, l, r) => EventTree::Node(n - m, l.clone(), r.clone()),
        }
    }

    /// Whether the tree is in canonical form.
    pub fn is_normal(&self) -> bool {
        match self {
            EventTree::Leaf(_) => true,
            EventTree::Node(_, l, r) => {
                l.is_normal()
                    && r.is_normal()
                    && !matches!(
                        (l.as_ref(), r.as_ref()),
                        (EventTree::Leaf(a), EventTree::Leaf(b)) if a == b
                    )
                    && l.min_value().min(r.min_value()) == 0
            }
        }
    }

    /// Rebuild the tree bottom-up through the canonical constructor.
    /// Idempotent; the identity on canonical trees.
    pub fn normalize(&self) -> EventTree {
        match self {
            EventTree::Leaf(n) => EventTree::Leaf(*n),
            EventTree::Node(n, l, r) => EventTree::node(*n, l.normalize(), r.normalize()),
        }
    }

    /// Least upper bound of two histories (pointwise max over the
    /// interval, expressed on trees).
    pub fn join(&self, other: &EventTree) -> EventTree {
        use EventTree::{Leaf, Node};
        match (self, other) {
            (Leaf(a), Leaf(b)) => Leaf(*a.max(b)),
            (Leaf(a), Node(..)) => {
                Node(*a, Box::new(Leaf(0)), Box::new(Leaf(0))).join(other)
            }
            (Node(..), Leaf(b)) => {
                self.join(&Node(*b, Box::new(Leaf(0)), Box::new(Leaf(0))))
            }
            (Node(n1, l1, r1), Node(n2, l2, r2)) => {
                if n1 > n2 {
                    other.join(self)
                } else {
                    let d = n2 - n1;
                    EventTree::node(*n1, l1.join(&l2.lift(d)), r1.join(&r2.lift(d)))
                }
            }
        }
    }

    /// Happens-before: does `other` count at least as many ticks as
    /// `self` at every point of the interval?
    ///
    /// Comparing absolute (path-summed) counts is what makes the order
    /// well-defined across structurally different trees.
    pub fn leq(&self, other: &EventTree) -> bool {
        self.leq_at(0, other, 0)
    }

    /// `leq` with accumulated path offsets, so subtrees compare by
    /// absolute count without materializing lifted copies.
    fn leq_at(&self, base: u64, other: &EventTree, other_base: u64) -> bool {
        use EventTree::{Leaf, Node};
        match (self, other) {
            (Leaf(n1), Leaf(n2)) | (Leaf(n1), Node(n2, _, _)) => base + n1 <= other_base + n2,
            (Node(n1, l1, r1), Leaf(n2)) => {
                let abs = base + n1;
                abs <= other_base + n2
                    && l1.leq_at(abs, other, other_base)
                    && r1.leq_at(abs, other, other_base)
            }
            (Node(n1, l1, r1), Node(n2, l2, r2)) => {
                let abs = base + n1;
                let other_abs = other_base + n2;
                abs <= other_abs
                    && l1.leq_at(abs, l2, other_abs)
                    && r1.leq_at(abs, r2, other_abs)
            }
        }
    }
}

impl Default for EventTree {
    fn default() -> Self {
        EventTree::Leaf(0)
    }
}

impl Lattice for EventTree {
    fn bottom() -> Self {
        Self::default()
    }

    fn join(&self, other: &Self) -> Self {
        EventTree::join(self, other)
    }

    fn leq(&self, other: &Self) -> bool {
        EventTree::leq(self, other)
    }
}
