//! fieldnote-surround: apply and remove inline formatting across a selection.
//!
//! The engine mutates the live DOM handed in by the editor, but only after a
//! pure planning pass has proven the operation feasible. Anything that would
//! cut across a block boundary degrades to a no-op (`None`) with the tree
//! untouched; callers treat that as "not applicable here", not as an error.
//!
//! - [`SurroundFormat`] describes one kind of formatting: how to recognize an
//!   element that already carries it, and how to create a fresh wrapper.
//! - [`MatchTree`] is the per-operation coverage snapshot.
//! - [`surround`] / [`unsurround`] are the two halves of a toggle;
//!   [`is_surrounded`] picks which one applies.
//! - [`surround_splitting`] additionally splits boundary-straddling inline
//!   elements, governed by a [`SplitPolicy`] table.

pub mod apply;
pub mod format;
pub mod splitter;
pub mod tree;

pub use apply::{is_surrounded, surround, surround_splitting, unsurround};
pub use format::SurroundFormat;
pub use splitter::{SplitParts, SplitPolicy, split_element_at};
pub use tree::{Coverage, MatchTree, Vertex, VertexKind};
