//! Coordinate paths: logical addresses into a subtree.
//!
//! A path is the sequence of child indices from a root node. Unlike a held
//! `NodeRef`, a path recorded against a snapshot stays meaningful as a
//! logical address while siblings are inserted and removed around it; the
//! caller decides when to resolve it against the current tree.

use kuchikiki::NodeRef;

use crate::error::DomError;

/// Child-index path of `node` relative to `root`.
pub fn coordinates_of(node: &NodeRef, root: &NodeRef) -> Result<Vec<usize>, DomError> {
    let mut path = Vec::new();
    let mut current = node.clone();
    while current != *root {
        let parent = current.parent().ok_or(DomError::OutsideRoot)?;
        let index = parent
            .children()
            .position(|child| child == current)
            .ok_or(DomError::OutsideRoot)?;
        path.push(index);
        current = parent;
    }
    path.reverse();
    Ok(path)
}

/// Resolve a path against the current tree. Out-of-range paths yield `None`,
/// never a panic, so speculative lookups are cheap.
pub fn node_at(root: &NodeRef, path: &[usize]) -> Option<NodeRef> {
    let mut current = root.clone();
    for &index in path {
        current = current.children().nth(index)?;
    }
    Some(current)
}
