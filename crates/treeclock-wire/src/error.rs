//! Error types for the binary codec.

use thiserror::Error;

/// Errors from decoding a packed stamp.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The bit stream ended inside a tree.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// An adaptive-width counter exceeds 64 bits.
    #[error("counter does not fit in 64 bits")]
    CounterOverflow,

    /// The final partial byte has nonzero padding bits.
    #[error("nonzero padding bits after value")]
    InvalidPadding,

    /// Whole bytes remain after the value and its padding.
    #[error("{len} trailing bytes after value")]
    TrailingData { len: usize },

    /// The input is not the canonical encoding of a canonical tree.
    #[error("input is not a canonical encoding")]
    NotCanonical,
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, WireError>;
