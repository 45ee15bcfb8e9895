//! Join-semilattice trait - the ordering backbone of causal histories
//!
//! A join-semilattice (S, ⊔) satisfies:
//! - Commutativity: a ⊔ b = b ⊔ a
//! - Associativity: (a ⊔ b) ⊔ c = a ⊔ (b ⊔ c)
//! - Idempotence:  a ⊔ a = a
//!
//! Merging histories that satisfy these laws converges to the same value
//! regardless of delivery order or grouping, which is what makes stamp
//! exchange safe over an unreliable network.

/// Values that merge by least upper bound.
///
/// `leq` is a required method rather than the usual `a ⊔ b == b`
/// derivation: event trees compare across structurally different shapes
/// by absolute path-summed counts, and deriving the order would build a
/// joined tree only to throw it away. Implementations must still agree
/// with the law `a.leq(b) ⇔ a.join(b) == b`; the property suite checks
/// the event-tree implementation against it.
pub trait Lattice: Clone + PartialEq {
    /// The bottom element (identity for join)
    fn bottom() -> Self;

    /// Join operation (least upper bound)
    /// Must be commutative, associative, and idempotent
    fn join(&self, other: &Self) -> Self;

    /// The partial order the join induces: a ≤ b iff a ⊔ b = b
    fn leq(&self, other: &Self) -> bool;
}
