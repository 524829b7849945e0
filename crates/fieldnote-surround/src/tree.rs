//! Persistent coverage snapshot of a DOM subtree.
//!
//! A `MatchTree` mirrors the shape of a subtree at the moment it is built and
//! records, per node, how the node relates to a selection and to a format
//! predicate. It is never synced with later mutation — each surround step
//! rebuilds what it needs — which is exactly why it is safe to keep paths
//! into it while the splitter rearranges siblings underneath: a path is a
//! logical address into the snapshot, not a live reference.

use std::rc::Rc;

use html5ever::LocalName;

use fieldnote_dom::NodeRef;
use fieldnote_dom::node;
use fieldnote_dom::position::{RangeOverlap, SelectionRange, overlap_for_keys};

#[derive(Clone, Debug)]
pub enum VertexKind {
    /// A text node and its char length.
    Text { len: usize },
    Element {
        name: LocalName,
        block: bool,
        /// Whether the element itself satisfies the format predicate.
        matched: bool,
    },
    /// Comments and anything else that cannot carry formatting.
    Other,
}

/// Payload recorded for every vertex.
#[derive(Clone, Debug)]
pub struct Coverage {
    pub kind: VertexKind,
    /// How much of the node lies inside the selection.
    pub overlap: RangeOverlap,
    /// Whether an ancestor (strictly above this node, within the snapshot
    /// root's scope) satisfies the format predicate.
    pub under_match: bool,
}

/// One immutable vertex; children mirror DOM child order at build time.
#[derive(Debug)]
pub struct Vertex {
    children: Vec<Rc<Vertex>>,
    pub payload: Coverage,
}

impl Vertex {
    pub fn children(&self) -> &[Rc<Vertex>] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<Rc<Vertex>> {
        self.children.get(index).cloned()
    }
}

/// The snapshot itself, addressed by child-index paths.
#[derive(Debug)]
pub struct MatchTree {
    root: Rc<Vertex>,
}

impl MatchTree {
    /// Build a snapshot of the subtree under `root`.
    ///
    /// `root_under_match` seeds ancestor-match state for the root, since
    /// matching elements may sit above the snapshot root (the caller checks
    /// with `find_closest` against its own base).
    pub fn build(
        root: &NodeRef,
        matcher: &dyn Fn(&NodeRef) -> bool,
        range: &SelectionRange,
        root_under_match: bool,
    ) -> Self {
        let start_key = range.start.sort_key();
        let end_key = range.end.sort_key();
        Self {
            root: build_vertex(root, matcher, &start_key, &end_key, root_under_match),
        }
    }

    pub fn root(&self) -> Rc<Vertex> {
        self.root.clone()
    }

    /// Vertex at `path`, or `None` when the path runs off the tree. Returns a
    /// fresh reference; the tree itself is never edited.
    pub fn get(&self, path: &[usize]) -> Option<Rc<Vertex>> {
        let mut vertex = self.root.clone();
        for &index in path {
            vertex = vertex.child(index)?;
        }
        Some(vertex)
    }

    /// Paths of all non-empty text vertices intersecting the selection, in
    /// document order, with their ancestor-match state.
    pub fn in_range_text_paths(&self) -> Vec<(Vec<usize>, bool)> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        collect_text_paths(&self.root, &mut path, &mut out);
        out
    }
}

fn build_vertex(
    node: &NodeRef,
    matcher: &dyn Fn(&NodeRef) -> bool,
    start_key: &[usize],
    end_key: &[usize],
    under_match: bool,
) -> Rc<Vertex> {
    let kind = match node.as_text() {
        Some(text) => VertexKind::Text {
            len: text.borrow().chars().count(),
        },
        None => match node::element_name(node) {
            Some(name) => VertexKind::Element {
                block: node::is_block_element(node),
                matched: matcher(node),
                name,
            },
            None => VertexKind::Other,
        },
    };
    let child_under_match =
        under_match || matches!(kind, VertexKind::Element { matched: true, .. });
    let children = node
        .children()
        .map(|child| build_vertex(&child, matcher, start_key, end_key, child_under_match))
        .collect();
    Rc::new(Vertex {
        children,
        payload: Coverage {
            kind,
            overlap: overlap_for_keys(node, start_key, end_key),
            under_match,
        },
    })
}

fn collect_text_paths(vertex: &Vertex, path: &mut Vec<usize>, out: &mut Vec<(Vec<usize>, bool)>) {
    if let VertexKind::Text { len } = vertex.payload.kind {
        if len > 0 && vertex.payload.overlap != RangeOverlap::Outside {
            out.push((path.clone(), vertex.payload.under_match));
        }
    }
    for (index, child) in vertex.children.iter().enumerate() {
        path.push(index);
        collect_text_paths(child, path, out);
        path.pop();
    }
}
