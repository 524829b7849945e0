//! fieldnote-dom: shared DOM model and range utilities.
//!
//! This crate provides:
//! - parsing and serialization through a full-document wrapper
//! - node classification (block-level, negligible) and structural helpers
//! - `Position` / `SelectionRange` boundary points with document-order
//!   normalization
//! - coordinate paths: logical addresses that survive sibling mutation
//!
//! The tree itself is `kuchikiki`'s reference-counted DOM; everything here
//! works on live `NodeRef`s handed in by the embedding editor.

pub mod coordinates;
pub mod error;
pub mod node;
pub mod parse;
pub mod position;

pub use error::DomError;
pub use kuchikiki::NodeRef;
pub use node::{find_closest, is_block_element, split_text_at, unwrap_element};
pub use parse::{inner_html, new_element, new_text, outer_html, parse_body_fragment};
pub use position::{Position, RangeOverlap, SelectionRange};
