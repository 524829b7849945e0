//! Tag allow-lists and the tag filter.
//!
//! External pastes keep only the tags a note field has a use for, with a
//! per-tag attribute allow-list. Everything else is unwrapped — its children
//! hoisted into its place — or removed outright when it carries no content.
//! The tables are data; the walk below is the only control flow.

use kuchikiki::NodeRef;

use fieldnote_dom::node::{element_name, unwrap_element};
use fieldnote_dom::parse::{inner_html, parse_body_fragment};

/// How an allowed element is handled.
#[derive(Clone, Copy, Debug)]
pub enum TagRule {
    /// Keep the element; keep only the listed attributes.
    Attrs(&'static [&'static str]),
    /// Keep the element; keep only its `style` attribute, whose declarations
    /// the style filter then reduces.
    StyledSpan,
}

/// Tags every paste mode keeps.
pub const BASIC_TAGS: &[(&str, TagRule)] = &[
    ("p", TagRule::Attrs(&[])),
    ("div", TagRule::Attrs(&[])),
    ("br", TagRule::Attrs(&[])),
    ("sub", TagRule::Attrs(&[])),
    ("sup", TagRule::Attrs(&[])),
    ("img", TagRule::Attrs(&["src"])),
];

/// Additional tags kept in extended mode.
pub const EXTENDED_TAGS: &[(&str, TagRule)] = &[
    ("b", TagRule::Attrs(&[])),
    ("blockquote", TagRule::Attrs(&[])),
    ("code", TagRule::Attrs(&[])),
    ("dd", TagRule::Attrs(&[])),
    ("dl", TagRule::Attrs(&[])),
    ("dt", TagRule::Attrs(&[])),
    ("em", TagRule::Attrs(&[])),
    ("h1", TagRule::Attrs(&[])),
    ("h2", TagRule::Attrs(&[])),
    ("h3", TagRule::Attrs(&[])),
    ("i", TagRule::Attrs(&[])),
    ("li", TagRule::Attrs(&[])),
    ("ol", TagRule::Attrs(&[])),
    ("pre", TagRule::Attrs(&[])),
    ("rp", TagRule::Attrs(&[])),
    ("rt", TagRule::Attrs(&[])),
    ("ruby", TagRule::Attrs(&[])),
    ("strong", TagRule::Attrs(&[])),
    ("table", TagRule::Attrs(&[])),
    ("u", TagRule::Attrs(&[])),
    ("ul", TagRule::Attrs(&[])),
    ("a", TagRule::Attrs(&["href"])),
    ("tr", TagRule::Attrs(&["rowspan"])),
    ("td", TagRule::Attrs(&["colspan", "rowspan"])),
    ("th", TagRule::Attrs(&["colspan", "rowspan"])),
    ("font", TagRule::Attrs(&["color"])),
    ("span", TagRule::StyledSpan),
];

/// Tags with no legitimate use inside a note field, removed with their
/// subtree even when something upstream let them through.
pub const PROHIBITED_TAGS: &[&str] = &["script", "link"];

fn tag_rule(name: &str, extended: bool) -> Option<TagRule> {
    let lookup = |table: &[(&str, TagRule)]| {
        table
            .iter()
            .find(|(tag, _)| *tag == name)
            .map(|(_, rule)| *rule)
    };
    lookup(BASIC_TAGS).or_else(|| extended.then(|| lookup(EXTENDED_TAGS)).flatten())
}

/// Reduce the body's subtree to the allow-list for the given mode.
pub fn filter_tags(body: &NodeRef, extended: bool) {
    let children: Vec<NodeRef> = body.children().collect();
    for child in children {
        filter_node(&child, extended);
    }
}

fn filter_node(node: &NodeRef, extended: bool) {
    // Children first: unwrapping a parent must not skip them.
    let children: Vec<NodeRef> = node.children().collect();
    for child in children {
        filter_node(&child, extended);
    }
    let Some(name) = element_name(node) else {
        return;
    };
    match tag_rule(name.as_ref(), extended) {
        Some(TagRule::Attrs(keep)) => retain_attributes(node, keep),
        Some(TagRule::StyledSpan) => retain_attributes(node, &["style"]),
        None => {
            if name.as_ref() == "title" || node.first_child().is_none() {
                node.detach();
            } else {
                unwrap_element(node);
            }
        }
    }
}

fn retain_attributes(node: &NodeRef, keep: &[&str]) {
    let Some(element) = node.as_element() else {
        return;
    };
    let mut attributes = element.attributes.borrow_mut();
    attributes
        .map
        .retain(|name, _| keep.contains(&name.local.as_ref()));
}

/// Remove prohibited elements from a parsed body.
pub fn remove_prohibited(body: &NodeRef) {
    let prohibited: Vec<NodeRef> = body
        .descendants()
        .filter(|n| {
            element_name(n).is_some_and(|name| PROHIBITED_TAGS.contains(&name.as_ref()))
        })
        .collect();
    for node in prohibited {
        node.detach();
    }
}

/// Parse markup and remove prohibited tags, returning the surviving inner
/// HTML. Assumes sanitized input; this is the defense-in-depth sweep, not
/// the sanitizer.
pub fn remove_prohibited_tags(html: &str) -> String {
    let body = parse_body_fragment(html);
    remove_prohibited(&body);
    inner_html(&body)
}
