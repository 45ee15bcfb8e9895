//! Stamps and the kernel: fork, event, join, and the message composites.
//!
//! A stamp pairs an identity tree with an event tree. The kernel keeps two
//! invariants across every operation: identities of live stamps partition
//! the unit interval without overlap (forks are the only source of
//! subdivision, joins the only sink), and both trees of every returned
//! stamp are canonical. All operations are pure; "mutating" a stamp means
//! rebinding to the returned value.

use crate::error::Result;
use crate::event::EventTree;
use crate::id::IdTree;
use serde::{Deserialize, Serialize};

/// Extra cost charged when inflation has to expand a leaf into a node
/// instead of bumping an existing one; dwarfs any per-level cost so depth
/// growth is always the last resort.
const GROW_EXPAND_COST: u64 = 1 << 32;

/// A participant's identity and causal history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    id: IdTree,
    event: EventTree,
}

impl Stamp {
    /// The seed stamp `(1,0)`: full interval ownership, empty history.
    pub fn seed() -> Self {
        Stamp {
            id: IdTree::One,
            event: EventTree::Leaf(0),
        }
    }

    /// Build a stamp from parts, canonicalizing both trees.
    pub fn new(id: IdTree, event: EventTree) -> Self {
        Stamp {
            id: id.normalize(),
            event: event.normalize(),
        }
    }

    /// The identity tree.
    pub fn id(&self) -> &IdTree {
        &self.id
    }

    /// The event tree (causal history).
    pub fn event_tree(&self) -> &EventTree {
        &self.event
    }

    /// Anonymous stamps own no identity region and cannot inflate.
    pub fn is_anonymous(&self) -> bool {
        self.id.is_zero()
    }

    /// Split into two stamps with disjoint identities and the same
    /// history. The parts' identities sum back to `self`'s.
    pub fn fork(&self) -> (Stamp, Stamp) {
        let (i1, i2) = self.id.split();
        (
            Stamp {
                id: i1,
                event: self.event.clone(),
            },
            Stamp {
                id: i2,
                event: self.event.clone(),
            },
        )
    }

    /// Three disjoint stamps: the first fork child plus a fork of the
    /// second.
    pub fn fork3(&self) -> (Stamp, Stamp, Stamp) {
        let (a, b) = self.fork();
        let (b1, b2) = b.fork();
        (a, b1, b2)
    }

    /// Four disjoint stamps: both fork children forked again.
    pub fn fork4(&self) -> (Stamp, Stamp, Stamp, Stamp) {
        let (a, b) = self.fork();
        let (a1, a2) = a.fork();
        let (b1, b2) = b.fork();
        (a1, a2, b1, b2)
    }

    /// Anonymous copy carrying the same history, for stamping outgoing
    /// messages or records.
    pub fn peek(&self) -> Stamp {
        Stamp {
            id: IdTree::Zero,
            event: self.event.clone(),
        }
    }

    /// Inflate the history somewhere inside the owned region.
    ///
    /// Anonymous stamps come back unchanged. Otherwise a fill pass raises
    /// fully owned regions without changing the tree shape; when that is
    /// a fixpoint, a grow pass bumps the cheapest leaf inside the owned
    /// region instead, deepening the tree only when unavoidable.
    pub fn event(&self) -> Stamp {
        if self.id.is_zero() {
            return self.clone();
        }
        let filled = fill(&self.id, &self.event);
        let event = if filled != self.event {
            filled
        } else {
            grow(&self.id, &self.event).0
        };
        Stamp {
            id: self.id.clone(),
            event,
        }
    }

    /// Merge two stamps: identities sum, histories take their least
    /// upper bound. Joining a peer's stamp back retires its identity;
    /// joining an anonymous stamp merges history only.
    pub fn join(&self, other: &Stamp) -> Result<Stamp> {
        Ok(Stamp {
            id: self.id.sum(&other.id)?,
            event: self.event.join(&other.event),
        })
    }

    /// Inflate, then split off the anonymous message stamp. Returns the
    /// new local stamp and the stamp to ship with the message.
    pub fn send(&self) -> (Stamp, Stamp) {
        let next = self.event();
        let message = next.peek();
        (next, message)
    }

    /// Merge an incoming message stamp, then inflate to mark the receipt.
    pub fn receive(&self, message: &Stamp) -> Result<Stamp> {
        Ok(self.join(message)?.event())
    }

    /// Happens-before on causal histories.
    pub fn leq(&self, other: &Stamp) -> bool {
        self.event.leq(&other.event)
    }

    /// The histories describe the same causal past.
    pub fn equiv(&self, other: &Stamp) -> bool {
        self.leq(other) && other.leq(self)
    }

    /// Neither history happened before the other.
    pub fn concurrent(&self, other: &Stamp) -> bool {
        !self.leq(other) && !other.leq(self)
    }

    /// Whether this stamp has seen everything `other` has.
    pub fn dominates(&self, other: &Stamp) -> bool {
        other.leq(self)
    }
}

impl Default for Stamp {
    fn default() -> Self {
        Stamp::seed()
    }
}

/// Shape-preserving inflation: wherever the id fully owns a region, raise
/// that region to the surrounding maximum. Returns the input unchanged
/// when no fully owned region can absorb a tick.
fn fill(id: &IdTree, event: &EventTree) -> EventTree {
    match (id, event) {
        (IdTree::Zero, e) => e.clone(),
        (IdTree::One, e) => EventTree::Leaf(e.max_value()),
        (_, EventTree::Leaf(n)) => EventTree::Leaf(*n),
        (IdTree::Node(il, ir), EventTree::Node(n, el, er)) => {
            if il.is_one() {
                // The left half is wholly owned: flatten it up to at
                // least the filled right half's floor.
                let right = fill(ir, er);
                let left = EventTree::Leaf(el.max_value().max(right.min_value()));
                EventTree::node(*n, left, right)
            } else if ir.is_one() {
                let left = fill(il, el);
                let right = EventTree::Leaf(er.max_value().max(left.min_value()));
                EventTree::node(*n, left, right)
            } else {
                EventTree::node(*n, fill(il, el), fill(ir, er))
            }
        }
    }
}

/// Inflation fallback for ids that own no whole event region: bump one
/// leaf inside the owned area. Returns the grown tree and a cost; the
/// recursion picks the cheaper side, ties going left, and expanding a
/// leaf into a node costs [`GROW_EXPAND_COST`] so depth growth loses to
/// any same-shape alternative.
fn grow(id: &IdTree, event: &EventTree) -> (EventTree, u64) {
    match (id, event) {
        (IdTree::One, e) => (EventTree::Leaf(e.max_value() + 1), 0),
        (IdTree::Node(..), EventTree::Leaf(n)) => {
            let expanded = EventTree::Node(
                *n,
                Box::new(EventTree::Leaf(0)),
                Box::new(EventTree::Leaf(0)),
            );
            let (grown, cost) = grow(id, &expanded);
            (grown, cost + GROW_EXPAND_COST)
        }
        (IdTree::Node(il, ir), EventTree::Node(n, el, er)) => {
            if il.is_zero() {
                let (right, cost) = grow(ir, er);
                (EventTree::node(*n, (**el).clone(), right), cost + 1)
            } else if ir.is_zero() {
                let (left, cost) = grow(il, el);
                (EventTree::node(*n, left, (**er).clone()), cost + 1)
            } else {
                let (left, left_cost) = grow(il, el);
                let (right, right_cost) = grow(ir, er);
                if left_cost <= right_cost {
                    (EventTree::node(*n, left, (**er).clone()), left_cost + 1)
                } else {
                    (EventTree::node(*n, (**el).clone(), right), right_cost + 1)
                }
            }
        }
        // event() never inflates an unowned region.
        (IdTree::Zero, _) => unreachable!("grow over an empty id"),
    }
}
