//! # treeclock-core
//!
//! Interval tree clocks: causality tracking for systems where
//! participants come and go without a global coordinator.
//!
//! This crate provides:
//! - [`IdTree`] - identity as a binary partition of the unit interval
//! - [`EventTree`] - causal history as per-region inflation counts
//! - [`Stamp`] - identity + history, with the fork/event/join kernel and
//!   the peek/send/receive message composites
//! - [`Lattice`] - the join-semilattice trait event trees implement
//! - Canonical text notation via `Display` / `FromStr`
//!
//! ## Design
//!
//! Everything is a pure value: kernel operations return freshly built
//! stamps and never touch their inputs, so sharing a stamp across readers
//! is safe by construction. Identities of live stamps always partition
//! the interval disjointly (fork subdivides, join recombines), which is
//! what lets every participant tick its own region of the event tree
//! without coordination. Both trees of every kernel result are kept in
//! canonical minimal form, so structural equality is semantic equality.
//!
//! ## Example
//!
//! ```rust
//! use treeclock_core::Stamp;
//!
//! // One seed, two participants.
//! let (left, right) = Stamp::seed().fork();
//!
//! // Work happens on both sides, unobserved by the other.
//! let left = left.event();
//! let right = right.event();
//! assert!(left.concurrent(&right));
//!
//! // A message carries the sender's history.
//! let (left, message) = left.send();
//! let right = right.receive(&message).unwrap();
//! assert!(right.dominates(&left));
//!
//! // Retiring the right participant hands its interval back.
//! let merged = left.join(&right).unwrap();
//! assert!(merged.id().is_one());
//! ```

pub mod error;
pub mod event;
pub mod id;
pub mod lattice;
pub mod stamp;
mod text;

pub use error::{CoreError, ParseError, Result};
pub use event::EventTree;
pub use id::IdTree;
pub use lattice::Lattice;
pub use stamp::Stamp;
