//! # treeclock-wire
//!
//! Packed binary codec for interval tree clock stamps.
//!
//! This crate provides:
//! - `encode` / `decode` for whole stamps
//! - `encode_id` / `decode_id` and `encode_event` / `decode_event` for
//!   the tree halves
//! - A strict decoder: exactly one byte form per canonical stamp
//!
//! The layout packs small structural tags and adaptive-width counters
//! into a bit stream, so idle participants cost a byte or two on the
//! wire rather than a serialized tree. See the `codec` layout table in
//! the source for the exact bit-level format.
//!
//! ## Example
//!
//! ```rust
//! use treeclock_core::Stamp;
//! use treeclock_wire::{decode, encode};
//!
//! let (stamp, message) = Stamp::seed().send();
//!
//! // Ship the message stamp with the payload...
//! let bytes = encode(&message);
//! assert_eq!(bytes.len(), 1);
//!
//! // ...and reconstruct it on the other side.
//! let received = decode(&bytes).unwrap();
//! assert_eq!(received, message);
//! assert!(received.leq(&stamp));
//! ```

mod bits;
mod codec;
mod error;

pub use codec::{decode, decode_event, decode_id, encode, encode_event, encode_id};
pub use error::{Result, WireError};
