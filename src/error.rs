//! Error types for list operations.
//!
//! Every failing operation reports one of these before touching any state,
//! so an `Err` always means the list is exactly as it was before the call.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An index fell outside the valid range for the operation.
    #[error("index {index} out of bounds for list of length {len}")]
    Index { index: usize, len: usize },

    /// A count was zero or the requested window ran past the live elements.
    #[error("range of {count} elements at {index} is invalid for list of length {len}")]
    Range { index: usize, count: usize, len: usize },

    /// A mutation was attempted on a fixed-size or read-only list.
    #[error("{op} is not supported on a {reason} list")]
    Unsupported { op: &'static str, reason: &'static str },

    /// The list changed structurally while a cursor was walking it.
    #[error("list was modified during enumeration (expected version {expected}, found {found})")]
    ConcurrentModification { expected: u64, found: u64 },

    /// The cursor is not positioned on an element.
    #[error("cursor is not positioned on an element")]
    NoCurrent,

    /// Invalid list options.
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
