//! Error types for DOM utilities.
//!
//! Infeasible *operations* (a surround that would cut a block in half) are
//! not errors; they surface as `None` from the operation itself. `DomError`
//! covers genuine API misuse in the low-level helpers.

use thiserror::Error;

/// Errors from the low-level DOM helpers.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DomError {
    /// An offset pointed past the end of a text node.
    #[error("offset {offset} is beyond the text length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    /// A text-only operation was handed a non-text node.
    #[error("node is not a text node")]
    NotAText,

    /// The node has no parent, so it has no siblings or child index.
    #[error("node is not attached to a parent")]
    Detached,

    /// The node is not a descendant of the stated root.
    #[error("node is not a descendant of the given root")]
    OutsideRoot,
}
