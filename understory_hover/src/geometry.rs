// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point containment and first-line measurement against a [`GeometryOracle`].

use kurbo::{Point, Rect};
use understory_document::{DocumentLookup, GeometryOracle, NodeKind};
use understory_readable::TagTable;

/// Closed-interval containment: points on any edge are inside.
///
/// Adjacent blocks that share an edge both contain points on it.
/// Non-finite rectangles contain nothing.
pub fn rect_contains_inclusive(rect: Rect, pt: Point) -> bool {
    let r = rect.abs();
    r.x0 <= pt.x && pt.x <= r.x1 && r.y0 <= pt.y && pt.y <= r.y1
}

/// Returns true if `pt` lies within the absolute box of `node`.
///
/// Nodes without measurable geometry never contain the pointer.
pub fn contains_point<K, G: GeometryOracle<K>>(oracle: &G, node: &K, pt: Point) -> bool {
    oracle
        .bounding_box(node)
        .is_some_and(|r| rect_contains_inclusive(r, pt))
}

/// Innermost text-block element reached by descending through first element children.
///
/// Starting at `node`, returns the first node on the chain whose tag is a
/// [`TEXT_BLOCK`](understory_readable::TagClass::TEXT_BLOCK), or `None` when the
/// chain runs out of element children first.
pub fn text_block_for<K: Copy, D: DocumentLookup<K>>(
    doc: &D,
    tags: &TagTable,
    node: K,
) -> Option<K> {
    let mut cur = node;
    loop {
        if doc.tag_name(&cur).is_some_and(|t| tags.is_text_block(t)) {
            return Some(cur);
        }
        cur = *doc
            .children(&cur)
            .iter()
            .find(|c| doc.kind(*c).is_some_and(NodeKind::is_element))?;
    }
}

/// First-line height for a candidate.
///
/// Measures the innermost text block found by [`text_block_for`], falling back to
/// the candidate itself when it wraps no text block.
pub fn first_line_height<K, H>(host: &H, tags: &TagTable, candidate: K) -> f64
where
    K: Copy,
    H: DocumentLookup<K> + GeometryOracle<K>,
{
    let measured = text_block_for(host, tags, candidate).unwrap_or(candidate);
    host.first_line_height(&measured)
}
