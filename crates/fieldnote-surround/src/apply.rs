//! The surround coordinator: decide first, mutate second.
//!
//! Every public operation runs a pure planning pass over a [`MatchTree`]
//! snapshot before touching the DOM. The plan either proves the operation
//! feasible — one block container, known boundary splits, known coverage —
//! or the operation returns `None` with the tree untouched. The mutation
//! pass that follows cannot fail: text splits, element splits and wrapping
//! all operate on structures the plan has already validated.

use tracing::debug;

use fieldnote_dom::NodeRef;
use fieldnote_dom::coordinates;
use fieldnote_dom::node;
use fieldnote_dom::position::{self, Position, RangeOverlap, SelectionRange, overlap_for_keys};

use crate::format::SurroundFormat;
use crate::splitter::{self, SplitPolicy};
use crate::tree::MatchTree;

/// Wrap the selected text with the format's wrapper element.
///
/// Returns the applied (or, for an already fully formatted selection, the
/// existing) element, or `None` when the operation is not applicable:
/// collapsed selection, no text selected, or a selection straddling sibling
/// block elements. The DOM is untouched in the `None` case. Node identities
/// inside the affected span may change; callers re-derive their selection.
pub fn surround(
    range: &SelectionRange,
    base: &NodeRef,
    format: &SurroundFormat,
) -> Option<NodeRef> {
    let plan = plan(range, base, format)?;
    if plan.fully_matched {
        debug!("surround: selection already fully formatted");
        return existing_wrapper(&plan, base, format);
    }
    let bounds = apply_boundary_splits(&plan);
    let wrappers = wrap_runs(&plan.container, &bounds, base, format);
    let mut applied = None;
    for wrapper in wrappers {
        let merged = normalize_wrapper(&wrapper, format);
        if applied.is_none() {
            applied = Some(merged);
        }
    }
    applied.or(Some(plan.container))
}

/// Remove the format from the selected text: fully covered matching elements
/// are unwrapped, partially covered ones are split first so untouched content
/// keeps its formatting.
///
/// Returns the block container on success, `None` when not applicable
/// (including a selection containing nothing that carries the format).
pub fn unsurround(
    range: &SelectionRange,
    base: &NodeRef,
    format: &SurroundFormat,
) -> Option<NodeRef> {
    let plan = plan(range, base, format)?;
    if !plan.any_matched {
        debug!("unsurround: nothing inside the selection carries the format");
        return None;
    }
    let bounds = apply_boundary_splits(&plan);
    remove_format_in(&plan.container, &bounds, format);
    Some(plan.container)
}

/// Whether either selection boundary sits inside a matching element. Drives
/// the surround/unsurround toggle.
pub fn is_surrounded(range: &SelectionRange, base: &NodeRef, format: &SurroundFormat) -> bool {
    node::find_closest(&range.start.node, base, |n| format.matches(n)).is_some()
        || node::find_closest(&range.end.node, base, |n| format.matches(n)).is_some()
}

/// Like [`surround`], but boundary-straddling inline elements are cloned
/// apart so the wrapper lands at the container level, instead of descending
/// into them. Which element types tolerate that is the policy table's call;
/// with the default policy any straddled element degrades the whole
/// operation to `None`.
pub fn surround_splitting(
    range: &SelectionRange,
    base: &NodeRef,
    format: &SurroundFormat,
    policy: &SplitPolicy,
) -> Option<NodeRef> {
    let plan = plan(range, base, format)?;
    if plan.fully_matched {
        return existing_wrapper(&plan, base, format);
    }
    let straddlers = boundary_straddlers(&plan);
    for element in &straddlers {
        if !policy.permits(element) {
            let name = node::element_name(element)
                .map(|n| n.to_string())
                .unwrap_or_default();
            debug!("surround: splitting not permitted for <{name}>, degrading to no-op");
            return None;
        }
    }
    let bounds = apply_boundary_splits(&plan);
    for element in &straddlers {
        if bounds.overlap(element) == RangeOverlap::Partial {
            let _ = splitter::split_element_at(element, &|n| bounds.overlap(n));
        }
    }
    // Splitting may have freed the bounds to hoist further.
    let bounds = hoist_bounds(&plan.container, bounds.first, bounds.last);
    let wrappers = wrap_runs(&plan.container, &bounds, base, format);
    let mut applied = None;
    for wrapper in wrappers {
        let merged = normalize_wrapper(&wrapper, format);
        if applied.is_none() {
            applied = Some(merged);
        }
    }
    applied.or(Some(plan.container))
}

struct Leaf {
    node: NodeRef,
    matched: bool,
}

struct Plan {
    range: SelectionRange,
    container: NodeRef,
    leaves: Vec<Leaf>,
    start_split: Option<(NodeRef, usize)>,
    end_split: Option<(NodeRef, usize)>,
    fully_matched: bool,
    any_matched: bool,
}

/// The pure feasibility pass. Returns `None` — without mutating anything —
/// whenever the mutation pass could not run to completion.
fn plan(range: &SelectionRange, base: &NodeRef, format: &SurroundFormat) -> Option<Plan> {
    let range = range.canonicalized(base);
    if range.is_collapsed() {
        debug!("surround: collapsed selection");
        return None;
    }
    let ancestor = range.common_ancestor()?;
    let root_under_match = node::find_closest(&ancestor, base, |n| format.matches(n)).is_some();
    let tree = MatchTree::build(&ancestor, &|n| format.matches(n), &range, root_under_match);

    let mut leaves = Vec::new();
    for (path, matched) in tree.in_range_text_paths() {
        let node = coordinates::node_at(&ancestor, &path)?;
        leaves.push(Leaf { node, matched });
    }
    if leaves.is_empty() {
        debug!("surround: no text inside the selection");
        return None;
    }

    let mut container: Option<NodeRef> = None;
    for leaf in &leaves {
        let candidate = node::block_container(&leaf.node, base);
        match &container {
            None => container = Some(candidate),
            Some(current) if *current == candidate => {}
            Some(_) => {
                debug!("surround: selection crosses a block boundary, degrading to no-op");
                return None;
            }
        }
    }

    let fully_matched = leaves.iter().all(|leaf| leaf.matched);
    let any_matched = leaves.iter().any(|leaf| leaf.matched);
    Some(Plan {
        start_split: text_split_point(&range.start),
        end_split: text_split_point(&range.end),
        container: container?,
        range,
        leaves,
        fully_matched,
        any_matched,
    })
}

fn text_split_point(position: &Position) -> Option<(NodeRef, usize)> {
    let text = position.node.as_text()?;
    let len = text.borrow().chars().count();
    (position.offset > 0 && position.offset < len)
        .then(|| (position.node.clone(), position.offset))
}

fn existing_wrapper(plan: &Plan, base: &NodeRef, format: &SurroundFormat) -> Option<NodeRef> {
    node::find_closest(&plan.leaves[0].node, base, |n| format.matches(n))
}

/// Node-anchored bounds of the selected content. Unlike `(parent, index)`
/// positions, these stay valid while siblings are inserted around them; the
/// sort keys are recomputed from the live tree on every query.
struct NodeBounds {
    first: NodeRef,
    last: NodeRef,
}

impl NodeBounds {
    fn overlap(&self, node: &NodeRef) -> RangeOverlap {
        let start = position::root_path(&self.first);
        let mut end = position::root_path(&self.last);
        if let Some(slot) = end.last_mut() {
            *slot += 1;
        }
        overlap_for_keys(node, &start, &end)
    }
}

/// Split the boundary text nodes recorded in the plan and return the bounds
/// of the in-range content. The end split runs first: both boundaries may
/// name the same text node, and splitting the end leaves the start offset
/// valid.
fn apply_boundary_splits(plan: &Plan) -> NodeBounds {
    if let Some((text, offset)) = &plan.end_split {
        // The suffix is outside the range and stays behind.
        let _ = node::split_text_at(text, *offset);
    }
    let mut first = plan.leaves[0].node.clone();
    let mut last = plan.leaves[plan.leaves.len() - 1].node.clone();
    if let Some((text, offset)) = &plan.start_split {
        if let Ok(Some(suffix)) = node::split_text_at(text, *offset) {
            if first == *text {
                first = suffix.clone();
            }
            if last == *text {
                last = suffix;
            }
        }
    }
    hoist_bounds(&plan.container, first, last)
}

/// Hoist each bound across edges it sits flush against, the node-level
/// analogue of range canonicalization.
fn hoist_bounds(container: &NodeRef, mut first: NodeRef, mut last: NodeRef) -> NodeBounds {
    loop {
        let Some(parent) = first.parent() else { break };
        if parent == *container || first.previous_sibling().is_some() {
            break;
        }
        first = parent;
    }
    loop {
        let Some(parent) = last.parent() else { break };
        if parent == *container || last.next_sibling().is_some() {
            break;
        }
        last = parent;
    }
    NodeBounds { first, last }
}

fn wrap_runs(
    container: &NodeRef,
    bounds: &NodeBounds,
    base: &NodeRef,
    format: &SurroundFormat,
) -> Vec<NodeRef> {
    let mut wrappers = Vec::new();
    wrap_children(container, bounds, base, format, &mut wrappers);
    wrappers
}

fn wrap_children(
    parent: &NodeRef,
    bounds: &NodeBounds,
    base: &NodeRef,
    format: &SurroundFormat,
    out: &mut Vec<NodeRef>,
) {
    let children: Vec<NodeRef> = parent.children().collect();
    let mut run: Vec<NodeRef> = Vec::new();
    for child in children {
        match bounds.overlap(&child) {
            RangeOverlap::Full => run.push(child),
            RangeOverlap::Outside => flush_run(&mut run, base, format, out),
            RangeOverlap::Partial => {
                flush_run(&mut run, base, format, out);
                // A partial text node cannot occur: boundaries were split.
                if child.as_element().is_some() {
                    wrap_children(&child, bounds, base, format, out);
                }
            }
        }
    }
    flush_run(&mut run, base, format, out);
}

/// Wrap a run of adjacent in-range siblings, unless everything in it already
/// carries the format (leaves already matching are left untouched) or the
/// run holds no text at all (no empty wrappers).
fn flush_run(
    run: &mut Vec<NodeRef>,
    base: &NodeRef,
    format: &SurroundFormat,
    out: &mut Vec<NodeRef>,
) {
    if run.is_empty() {
        return;
    }
    let nodes = std::mem::take(run);
    let needs_wrap = nodes
        .iter()
        .any(|node| has_unformatted_text(node, base, format));
    if !needs_wrap {
        return;
    }
    let wrapper = format.create_wrapper();
    nodes[0].insert_before(wrapper.clone());
    for node in &nodes {
        wrapper.append(node.clone());
    }
    out.push(wrapper);
}

fn has_unformatted_text(node: &NodeRef, base: &NodeRef, format: &SurroundFormat) -> bool {
    node.inclusive_descendants().any(|n| {
        n.as_text().is_some_and(|text| !text.borrow().is_empty())
            && node::find_closest(&n, base, |el| format.matches(el)).is_none()
    })
}

/// Merge a new wrapper with matching neighbours (absorbing negligible nodes
/// between them) and unwrap now-redundant matching elements nested inside.
fn normalize_wrapper(wrapper: &NodeRef, format: &SurroundFormat) -> NodeRef {
    let mut merged = wrapper.clone();

    let mut gap: Vec<NodeRef> = Vec::new();
    let mut cursor = merged.previous_sibling();
    while let Some(sibling) = cursor {
        if format.matches(&sibling) {
            for node in gap.iter().rev() {
                sibling.append(node.clone());
            }
            let children: Vec<NodeRef> = merged.children().collect();
            for child in children {
                sibling.append(child);
            }
            merged.detach();
            merged = sibling;
            break;
        } else if node::is_negligible(&sibling) {
            cursor = sibling.previous_sibling();
            gap.push(sibling);
        } else {
            break;
        }
    }

    let mut gap: Vec<NodeRef> = Vec::new();
    let mut cursor = merged.next_sibling();
    while let Some(sibling) = cursor {
        if format.matches(&sibling) {
            for node in gap.drain(..) {
                merged.append(node);
            }
            let children: Vec<NodeRef> = sibling.children().collect();
            for child in children {
                merged.append(child);
            }
            sibling.detach();
            break;
        } else if node::is_negligible(&sibling) {
            cursor = sibling.next_sibling();
            gap.push(sibling);
        } else {
            break;
        }
    }

    let redundant: Vec<NodeRef> = merged
        .descendants()
        .filter(|n| format.matches(n))
        .collect();
    for node in redundant {
        node::unwrap_element(&node);
    }

    merged
}

fn remove_format_in(parent: &NodeRef, bounds: &NodeBounds, format: &SurroundFormat) {
    let children: Vec<NodeRef> = parent.children().collect();
    for child in children {
        if child.as_element().is_none() {
            continue;
        }
        match bounds.overlap(&child) {
            RangeOverlap::Outside => {}
            RangeOverlap::Full => {
                remove_format_in(&child, bounds, format);
                if format.matches(&child) {
                    node::unwrap_element(&child);
                }
            }
            RangeOverlap::Partial => {
                if format.matches(&child) {
                    // Clone the wrapper apart so only the covered part loses
                    // the format; the clones keep it for the rest.
                    if let Some(parts) =
                        splitter::split_element_at(&child, &|n| bounds.overlap(n))
                    {
                        remove_format_in(&parts.middle, bounds, format);
                        node::unwrap_element(&parts.middle);
                    }
                } else {
                    remove_format_in(&child, bounds, format);
                }
            }
        }
    }
}

/// Elements partially covered by the selection on either boundary's ancestor
/// chain below the container, outermost first.
fn boundary_straddlers(plan: &Plan) -> Vec<NodeRef> {
    let mut out: Vec<NodeRef> = Vec::new();
    for position in [&plan.range.start, &plan.range.end] {
        let mut chain: Vec<NodeRef> = Vec::new();
        let mut current = Some(position.node.clone());
        let mut reached_container = false;
        while let Some(n) = current {
            if n == plan.container {
                reached_container = true;
                break;
            }
            current = n.parent();
            chain.push(n);
        }
        if !reached_container {
            continue;
        }
        for n in chain.iter().rev() {
            if n.as_element().is_some()
                && plan.range.overlap(n) == RangeOverlap::Partial
                && !out.contains(n)
            {
                out.push(n.clone());
            }
        }
    }
    out
}
