//! fieldnote-filter: the paste pipeline.
//!
//! Raw clipboard HTML goes through three stages before it may enter the
//! editable surface:
//!
//! 1. [`sanitize`] strips active content (scripts, handlers, style sheets)
//!    from the raw string;
//! 2. the tag filter reduces elements to a mode-dependent allow-list;
//! 3. the style filter reduces inline styling to a mode-dependent rule set.
//!
//! The stages must run in that order: the tag and style filters assume their
//! input is already free of active content. [`filter_html`] composes them.

pub mod pipeline;
pub mod plain;
pub mod sanitize;
pub mod styling;
pub mod tags;

pub use pipeline::{PasteContext, filter_html, filter_html_with};
pub use plain::text_to_html;
pub use sanitize::sanitize;
pub use styling::{ColorScheme, StylePredicate, filter_styling, styling_rules};
pub use tags::remove_prohibited_tags;
