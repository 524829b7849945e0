//! Splitting boundary-straddling elements.
//!
//! When a selection boundary falls strictly inside an element, the element
//! can be cloned into independent siblings so that only the covered part is
//! formatted. Which element types tolerate this is a policy decision, kept
//! in a table: block-level containers never split, and by default no element
//! does. The unsurround path splits the format's own wrappers regardless of
//! the table — cloning an element the format itself recognizes and can
//! recreate is structure-preserving by construction.

use fieldnote_dom::NodeRef;
use fieldnote_dom::node;
use fieldnote_dom::position::RangeOverlap;

/// Element types that may be cloned apart at a selection boundary.
#[derive(Clone, Debug, Default)]
pub struct SplitPolicy {
    allowed: Vec<String>,
}

impl SplitPolicy {
    /// The default policy: nothing may be split.
    pub fn none() -> Self {
        Self::default()
    }

    /// Permit splitting for the named inline element types.
    pub fn allowing(tags: &[&str]) -> Self {
        Self {
            allowed: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn permits(&self, node: &NodeRef) -> bool {
        if node::is_block_element(node) {
            return false;
        }
        node::element_name(node)
            .is_some_and(|name| self.allowed.iter().any(|t| t == name.as_ref()))
    }
}

/// Result of splitting: up to three siblings, attributes duplicated onto
/// each, children distributed without loss or duplication.
pub struct SplitParts {
    pub before: Option<NodeRef>,
    pub middle: NodeRef,
    pub after: Option<NodeRef>,
}

/// Split `element` so that the children covered by the range end up in a
/// standalone middle sibling. `overlap` reports coverage of any node against
/// the current range.
///
/// Boundary text nodes must already be split; a partial element child is
/// resolved by splitting it first (it is inline by construction, since the
/// range never crosses out of its block container). Returns `None` without
/// mutating anything it should not when the structure cannot be resolved.
pub fn split_element_at<F>(element: &NodeRef, overlap: &F) -> Option<SplitParts>
where
    F: Fn(&NodeRef) -> RangeOverlap,
{
    // Resolve partial children first so every boundary lies between siblings.
    let children: Vec<NodeRef> = element.children().collect();
    for child in &children {
        if overlap(child) == RangeOverlap::Partial {
            if child.as_element().is_none() || node::is_block_element(child) {
                return None;
            }
            split_element_at(child, overlap)?;
        }
    }

    let children: Vec<NodeRef> = element.children().collect();
    let mut first = None;
    let mut last = None;
    for (index, child) in children.iter().enumerate() {
        if overlap(child) == RangeOverlap::Full {
            if first.is_none() {
                first = Some(index);
            }
            last = Some(index);
        }
    }
    let (first, last) = (first?, last?);

    if first == 0 && last + 1 == children.len() {
        return Some(SplitParts {
            before: None,
            middle: element.clone(),
            after: None,
        });
    }

    let before = if first > 0 {
        let clone = node::shallow_clone(element)?;
        element.insert_before(clone.clone());
        for child in &children[..first] {
            clone.append(child.clone());
        }
        Some(clone)
    } else {
        None
    };
    let after = if last + 1 < children.len() {
        let clone = node::shallow_clone(element)?;
        element.insert_after(clone.clone());
        for child in &children[last + 1..] {
            clone.append(child.clone());
        }
        Some(clone)
    } else {
        None
    };

    Some(SplitParts {
        before,
        middle: element.clone(),
        after,
    })
}
