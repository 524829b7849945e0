//! Node classification and structural helpers.

use html5ever::LocalName;
use kuchikiki::NodeRef;

use crate::error::DomError;

/// Elements that establish block-level structure. Surround operations refuse
/// to cut across the boundary of any of these.
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "dd",
    "details",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

/// Local name of an element node, if it is one.
pub fn element_name(node: &NodeRef) -> Option<LocalName> {
    node.as_element().map(|e| e.name.local.clone())
}

pub fn is_block_element(node: &NodeRef) -> bool {
    match node.as_element() {
        Some(e) => BLOCK_ELEMENTS.contains(&e.name.local.as_ref()),
        None => false,
    }
}

pub fn is_text(node: &NodeRef) -> bool {
    node.as_text().is_some()
}

/// Char length of a text node, child count otherwise.
pub fn node_length(node: &NodeRef) -> usize {
    match node.as_text() {
        Some(text) => text.borrow().chars().count(),
        None => node.children().count(),
    }
}

/// Nodes that carry no text: empty text nodes, comments, and elements whose
/// subtree contains no characters (`<br>`, `<img>`, empty spans). These do
/// not interrupt a formatting run.
pub fn is_negligible(node: &NodeRef) -> bool {
    match node.as_text() {
        Some(text) => text.borrow().is_empty(),
        None => node.text_contents().is_empty(),
    }
}

/// Walk from `node` (inclusive) up to `base` (exclusive), returning the first
/// node the predicate accepts.
pub fn find_closest(
    node: &NodeRef,
    base: &NodeRef,
    predicate: impl Fn(&NodeRef) -> bool,
) -> Option<NodeRef> {
    let mut current = Some(node.clone());
    while let Some(n) = current {
        if n == *base {
            return None;
        }
        if predicate(&n) {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

/// The nearest block-level ancestor of `node` below `base`, or `base` itself.
pub fn block_container(node: &NodeRef, base: &NodeRef) -> NodeRef {
    find_closest(node, base, is_block_element).unwrap_or_else(|| base.clone())
}

/// Clone an element without its children: same tag, same attributes.
pub fn shallow_clone(node: &NodeRef) -> Option<NodeRef> {
    let element = node.as_element()?;
    let attributes = element.attributes.borrow();
    Some(NodeRef::new_element(
        element.name.clone(),
        attributes
            .map
            .iter()
            .map(|(name, attr)| (name.clone(), attr.clone())),
    ))
}

/// Split a text node at a char offset. The node keeps the prefix; the suffix
/// moves into a new sibling, which is returned. Splitting at either end is a
/// no-op returning `None`.
pub fn split_text_at(node: &NodeRef, offset: usize) -> Result<Option<NodeRef>, DomError> {
    let text = node.as_text().ok_or(DomError::NotAText)?;
    let mut content = text.borrow_mut();
    let len = content.chars().count();
    if offset > len {
        return Err(DomError::OffsetOutOfRange { offset, len });
    }
    if offset == 0 || offset == len {
        return Ok(None);
    }
    let byte = content
        .char_indices()
        .nth(offset)
        .map(|(i, _)| i)
        .unwrap_or(content.len());
    let suffix = content.split_off(byte);
    drop(content);
    let new = NodeRef::new_text(suffix);
    node.insert_after(new.clone());
    Ok(Some(new))
}

/// Remove an element, hoisting its children into its place. Returns the first
/// hoisted child, if any.
pub fn unwrap_element(node: &NodeRef) -> Option<NodeRef> {
    node.as_element()?;
    let children: Vec<NodeRef> = node.children().collect();
    for child in &children {
        node.insert_before(child.clone());
    }
    node.detach();
    children.into_iter().next()
}
