//! The paste pipeline.
//!
//! Composes sanitizer, tag filter and style filter into the single call the
//! editor makes on every paste or drop. All failure modes resolve to a safe
//! string; nothing here returns an error or panics on adversarial input.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use kuchikiki::NodeRef;

use fieldnote_dom::parse::{inner_html, parse_body_fragment};

use crate::sanitize::sanitize;
use crate::styling::{ColorScheme, filter_styling, styling_rules};
use crate::tags;

/// Trust level and retention policy for one paste.
#[derive(Clone, Copy, Debug)]
pub struct PasteContext {
    /// Source and destination are the same editing surface.
    pub internal: bool,
    /// Whether foreign formatting is retained at all.
    pub extended: bool,
    pub color_scheme: ColorScheme,
}

impl PasteContext {
    pub fn new(internal: bool, extended: bool) -> Self {
        Self {
            internal,
            extended,
            color_scheme: ColorScheme::default(),
        }
    }

    pub fn with_color_scheme(mut self, color_scheme: ColorScheme) -> Self {
        self.color_scheme = color_scheme;
        self
    }
}

static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\n\t ]+").unwrap());

/// Filter pasted markup for insertion at the selection, in the light color
/// scheme. See [`filter_html_with`] for the full contract.
pub fn filter_html(html: &str, internal: bool, extended: bool) -> String {
    filter_html_with(html, &PasteContext::new(internal, extended))
}

/// Filter pasted markup for insertion at the selection.
///
/// - internal pastes trust tags and presentation; only active content, the
///   prohibited tags and non-inheriting style properties are removed;
/// - external extended pastes reduce tags and styling to the rule tables for
///   the destination color scheme;
/// - external non-extended pastes strip all foreign formatting and collapse
///   whitespace runs.
///
/// Empty input returns empty output in every mode.
pub fn filter_html_with(html: &str, context: &PasteContext) -> String {
    if html.is_empty() {
        return String::new();
    }
    trace!(
        internal = context.internal,
        extended = context.extended,
        "filtering pasted markup"
    );

    let sanitized = sanitize(html);
    let body = parse_body_fragment(&sanitized);

    if !context.internal {
        tags::filter_tags(&body, context.extended);
    }
    if let Some(predicate) =
        styling_rules(context.internal, context.extended, context.color_scheme)
    {
        apply_styling(&body, filter_styling(predicate));
    }
    tags::remove_prohibited(&body);

    let mut out = inner_html(&body);
    if !context.internal && !context.extended {
        out = WHITESPACE_RUNS.replace_all(&out, " ").into_owned();
    }
    out.trim().to_string()
}

fn apply_styling(body: &NodeRef, filter: impl Fn(&NodeRef)) {
    for node in body.descendants() {
        filter(&node);
    }
}
