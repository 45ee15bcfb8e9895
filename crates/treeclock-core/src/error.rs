//! Error types for the clock algebra.

use thiserror::Error;

/// Errors from kernel operations on stamps.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Both identity trees claim a point of the same interval region.
    /// Stamps produced exclusively by the kernel stay disjoint; this only
    /// fires on externally constructed input.
    #[error("identity trees overlap: both operands claim the same region")]
    OverlappingIds,
}

/// Errors from parsing the canonical textual notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input has a character the grammar does not allow here.
    #[error("unexpected input at byte {pos}: expected {expected}")]
    Unexpected { pos: usize, expected: &'static str },

    /// The input ended in the middle of a tree.
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    /// A complete tree was parsed but input remains.
    #[error("trailing input after value at byte {pos}")]
    Trailing { pos: usize },

    /// An event counter does not fit in 64 bits.
    #[error("counter at byte {pos} does not fit in 64 bits")]
    CounterOverflow { pos: usize },

    /// The parsed tree is syntactically valid but not in canonical form.
    #[error("tree is not in canonical form")]
    NotCanonical,
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, CoreError>;
