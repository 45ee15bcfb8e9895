//! Identity trees: binary interval partitions of [0, 1].
//!
//! An identity tree records which part of the unit interval a participant
//! owns. The leaf `1` owns the whole current interval, `0` owns nothing,
//! and a node `(l, r)` halves the interval between its children. Forking
//! splits ownership, joining sums it back, and keeping ids disjoint across
//! participants is what lets each one inflate its region of the event tree
//! without coordination.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// An interval partition in canonical form.
///
/// Canonical means no subtree reads `(0,0)` or `(1,1)`; both collapse to
/// the equivalent leaf. Build interior nodes through [`IdTree::node`] and
/// the invariant holds by construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdTree {
    /// Owns nothing in the current interval.
    Zero,
    /// Owns the whole current interval.
    One,
    /// Splits the interval in half between two children.
    Node(Box<IdTree>, Box<IdTree>),
}

impl IdTree {
    /// The empty id.
    pub fn zero() -> Self {
        IdTree::Zero
    }

    /// The full-interval id (the seed's identity).
    pub fn one() -> Self {
        IdTree::One
    }

    /// Build an interior node in canonical form: `(0,0)` collapses to `0`
    /// and `(1,1)` to `1`.
    pub fn node(left: IdTree, right: IdTree) -> Self {
        match (&left, &right) {
            (IdTree::Zero, IdTree::Zero) => IdTree::Zero,
            (IdTree::One, IdTree::One) => IdTree::One,
            _ => IdTree::Node(Box::new(left), Box::new(right)),
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, IdTree::Zero)
    }

    pub fn is_one(&self) -> bool {
        matches!(self, IdTree::One)
    }

    /// Whether the tree is in canonical form.
    pub fn is_normal(&self) -> bool {
        match self {
            IdTree::Zero | IdTree::One => true,
            IdTree::Node(l, r) => {
                l.is_normal()
                    && r.is_normal()
                    && !(l.is_zero() && r.is_zero())
                    && !(l.is_one() && r.is_one())
            }
        }
    }

    /// Rebuild the tree bottom-up through the canonical constructor.
    /// Idempotent; the identity on canonical trees.
    pub fn normalize(&self) -> IdTree {
        match self {
            IdTree::Zero => IdTree::Zero,
            IdTree::One => IdTree::One,
            IdTree::Node(l, r) => IdTree::node(l.normalize(), r.normalize()),
        }
    }

    /// Partition this id into two disjoint halves whose sum is `self`.
    ///
    /// `1` splits into the two half-interval owners; a node with one empty
    /// side pushes the split into the occupied side; a node with two
    /// occupied sides hands one side to each part.
    pub fn split(&self) -> (IdTree, IdTree) {
        match self {
            IdTree::Zero => (IdTree::Zero, IdTree::Zero),
            IdTree::One => (
                IdTree::node(IdTree::One, IdTree::Zero),
                IdTree::node(IdTree::Zero, IdTree::One),
            ),
            IdTree::Node(l, r) if r.is_zero() => {
                let (l0, l1) = l.split();
                (
                    IdTree::node(l0, IdTree::Zero),
                    IdTree::node(l1, IdTree::Zero),
                )
            }
            IdTree::Node(l, r) if l.is_zero() => {
                let (r0, r1) = r.split();
                (
                    IdTree::node(IdTree::Zero, r0),
                    IdTree::node(IdTree::Zero, r1),
                )
            }
            IdTree::Node(l, r) => (
                IdTree::node((**l).clone(), IdTree::Zero),
                IdTree::node(IdTree::Zero, (**r).clone()),
            ),
        }
    }

    /// Pointwise disjunction of two disjoint ids.
    ///
    /// Fails with [`CoreError::OverlappingIds`] when both operands claim a
    /// common point, which a `1` leaf meeting any non-`0` operand does.
    pub fn sum(&self, other: &IdTree) -> Result<IdTree> {
        match (self, other) {
            (IdTree::Zero, x) | (x, IdTree::Zero) => Ok(x.clone()),
            (IdTree::Node(l1, r1), IdTree::Node(l2, r2)) => {
                Ok(IdTree::node(l1.sum(l2)?, r1.sum(r2)?))
            }
            _ => Err(CoreError::OverlappingIds),
        }
    }
}
