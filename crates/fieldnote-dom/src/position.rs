//! Boundary positions and selection ranges over the DOM tree.
//!
//! A position is a char offset inside a text node or a child index inside an
//! element, exactly like a DOM boundary point (but char-based, not UTF-16).
//! Document-order comparison works on root paths, so positions from the same
//! tree always order consistently even while siblings are being inserted.

use kuchikiki::NodeRef;

use crate::error::DomError;
use crate::node;

/// A boundary point inside the DOM tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub node: NodeRef,
    pub offset: usize,
}

impl Position {
    pub fn new(node: NodeRef, offset: usize) -> Self {
        Self { node, offset }
    }

    /// The boundary immediately before `node`, in its parent.
    pub fn before(node: &NodeRef) -> Result<Self, DomError> {
        let parent = node.parent().ok_or(DomError::Detached)?;
        let offset = child_index(node)?;
        Ok(Self::new(parent, offset))
    }

    /// The boundary immediately after `node`, in its parent.
    pub fn after(node: &NodeRef) -> Result<Self, DomError> {
        let parent = node.parent().ok_or(DomError::Detached)?;
        let offset = child_index(node)? + 1;
        Ok(Self::new(parent, offset))
    }

    /// Root path plus offset; lexicographic order is document order.
    pub fn sort_key(&self) -> Vec<usize> {
        let mut key = path_from_root(&self.node);
        key.push(self.offset);
        key
    }
}

/// Index of `node` among its parent's children.
pub fn child_index(node: &NodeRef) -> Result<usize, DomError> {
    let parent = node.parent().ok_or(DomError::Detached)?;
    parent
        .children()
        .position(|child| child == *node)
        .ok_or(DomError::Detached)
}

/// Child-index path of `node` from its tree root; lexicographic order over
/// these paths is document order.
pub fn root_path(node: &NodeRef) -> Vec<usize> {
    path_from_root(node)
}

fn path_from_root(node: &NodeRef) -> Vec<usize> {
    let mut path = Vec::new();
    let mut current = node.clone();
    while let Some(parent) = current.parent() {
        let index = parent
            .children()
            .position(|child| child == current)
            .unwrap_or(0);
        path.push(index);
        current = parent;
    }
    path.reverse();
    path
}

/// How much of a node lies inside a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeOverlap {
    Outside,
    Partial,
    Full,
}

/// Overlap of `node` against boundary sort keys from the same tree.
pub fn overlap_for_keys(node: &NodeRef, start_key: &[usize], end_key: &[usize]) -> RangeOverlap {
    let before = path_from_root(node);
    let Some(last) = before.last().copied() else {
        // The tree root spans everything.
        return RangeOverlap::Partial;
    };
    let mut after = before.clone();
    if let Some(slot) = after.last_mut() {
        *slot = last + 1;
    }
    if after.as_slice() <= start_key || end_key <= before.as_slice() {
        RangeOverlap::Outside
    } else if start_key <= before.as_slice() && after.as_slice() <= end_key {
        RangeOverlap::Full
    } else {
        RangeOverlap::Partial
    }
}

/// An ordered pair of boundary points.
#[derive(Clone, Debug)]
pub struct SelectionRange {
    pub start: Position,
    pub end: Position,
}

impl SelectionRange {
    /// Build from anchor and focus in any order; the result is normalized to
    /// document order.
    pub fn new(anchor: Position, focus: Position) -> Self {
        if anchor.sort_key() <= focus.sort_key() {
            Self {
                start: anchor,
                end: focus,
            }
        } else {
            Self {
                start: focus,
                end: anchor,
            }
        }
    }

    /// A range covering exactly `node`.
    pub fn select_node(node: &NodeRef) -> Result<Self, DomError> {
        Ok(Self {
            start: Position::before(node)?,
            end: Position::after(node)?,
        })
    }

    /// A range covering the contents of `node`.
    pub fn select_node_contents(node: &NodeRef) -> Self {
        Self {
            start: Position::new(node.clone(), 0),
            end: Position::new(node.clone(), node::node_length(node)),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start.sort_key() == self.end.sort_key()
    }

    /// Deepest node containing both boundaries.
    pub fn common_ancestor(&self) -> Option<NodeRef> {
        let start_chain: Vec<NodeRef> = self.start.node.inclusive_ancestors().collect();
        self.end
            .node
            .inclusive_ancestors()
            .find(|n| start_chain.contains(n))
    }

    pub fn overlap(&self, node: &NodeRef) -> RangeOverlap {
        overlap_for_keys(node, &self.start.sort_key(), &self.end.sort_key())
    }

    /// Hoist each boundary outward across edges it sits flush against,
    /// stopping at `base`. No content moves in or out of the range; a
    /// boundary like "offset 0 inside `<i>`" simply becomes "before `<i>`",
    /// which lets fully covered elements be recognized as such.
    pub fn canonicalized(&self, base: &NodeRef) -> Self {
        let mut start = self.start.clone();
        while start.node != *base && start.offset == 0 {
            match Position::before(&start.node) {
                Ok(p) => start = p,
                Err(_) => break,
            }
        }
        let mut end = self.end.clone();
        while end.node != *base && end.offset == node::node_length(&end.node) {
            match Position::after(&end.node) {
                Ok(p) => end = p,
                Err(_) => break,
            }
        }
        Self { start, end }
    }
}
