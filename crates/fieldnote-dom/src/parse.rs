//! Parsing and serialization through a full-document wrapper.
//!
//! Fragments are always parsed inside a complete document skeleton. Handing a
//! bare fragment to an HTML parser lets it relocate leading metadata-looking
//! content (a `<style>` or `<title>` at the start of the clipboard payload)
//! out of the body, silently changing what the filters see.

use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::{LocalName, QualName, namespace_url, ns};
use kuchikiki::traits::TendrilSink;
use kuchikiki::{Attribute, ExpandedName, NodeRef};

/// Parse an HTML fragment and return the `<body>` element holding it.
pub fn parse_body_fragment(html: &str) -> NodeRef {
    let document =
        kuchikiki::parse_html().one(format!("<html><head></head><body>{html}</body></html>"));
    match document.select_first("body") {
        Ok(body) => body.as_node().clone(),
        // The parser always materializes a body; this is unreachable in
        // practice but must not panic on adversarial input.
        Err(()) => document,
    }
}

/// Serialized markup of a node's children.
pub fn inner_html(node: &NodeRef) -> String {
    serialize_with_scope(node, TraversalScope::ChildrenOnly(None))
}

/// Serialized markup of the node itself.
pub fn outer_html(node: &NodeRef) -> String {
    serialize_with_scope(node, TraversalScope::IncludeNode)
}

fn serialize_with_scope(node: &NodeRef, traversal_scope: TraversalScope) -> String {
    let mut buf = Vec::new();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };
    if serialize(&mut buf, node, opts).is_err() {
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}

/// Create a detached HTML element.
pub fn new_element(tag: &str, attributes: &[(&str, &str)]) -> NodeRef {
    NodeRef::new_element(
        QualName::new(None, ns!(html), LocalName::from(tag)),
        attributes.iter().map(|(name, value)| {
            (
                ExpandedName::new(ns!(), LocalName::from(*name)),
                Attribute {
                    prefix: None,
                    value: (*value).to_string(),
                },
            )
        }),
    )
}

/// Create a detached text node.
pub fn new_text(text: impl Into<String>) -> NodeRef {
    NodeRef::new_text(text.into())
}

/// Value of an attribute on an element node.
pub fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    let element = node.as_element()?;
    let attributes = element.attributes.borrow();
    attributes.get(name).map(str::to_string)
}

/// Set an attribute on an element node; non-elements are left untouched.
pub fn set_attribute(node: &NodeRef, name: &str, value: impl Into<String>) {
    if let Some(element) = node.as_element() {
        element.attributes.borrow_mut().insert(name, value.into());
    }
}
