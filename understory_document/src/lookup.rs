// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only lookups over a document tree and its rendered geometry.
//!
//! Extraction and hover resolution are written against these traits rather than
//! against [`Document`](crate::Document), so a host that already owns a tree
//! (a browser engine, a layout crate, a test fixture) can plug it in directly.

use kurbo::Rect;

use crate::types::NodeKind;

/// Read-only structural view of a document tree.
///
/// Implementations must describe a well-formed, acyclic tree: following
/// [`parent`](DocumentLookup::parent) from any node terminates, and every child
/// listed by [`children`](DocumentLookup::children) reports that node as its parent.
pub trait DocumentLookup<K> {
    /// Kind of `node`, or `None` if the key no longer refers to a node.
    fn kind(&self, node: &K) -> Option<NodeKind>;

    /// Tag name of an element node, as reported by the host (e.g. `"DIV"`).
    ///
    /// Text nodes and stale keys return `None`.
    fn tag_name(&self, node: &K) -> Option<&str>;

    /// Text payload of a text node. Elements and stale keys return `None`.
    fn text(&self, node: &K) -> Option<&str>;

    /// Non-owning back-reference to the parent, if any.
    fn parent(&self, node: &K) -> Option<K>;

    /// Direct children in document order. Empty for leaves and stale keys.
    fn children(&self, node: &K) -> &[K];
}

/// Absolute geometry of rendered nodes.
pub trait GeometryOracle<K> {
    /// Border box of `node` in absolute document coordinates, including the
    /// current scroll offset.
    ///
    /// Returns `None` when the node has no measurable geometry.
    fn bounding_box(&self, node: &K) -> Option<Rect>;

    /// Rendered height of the first line of text within `node`, or `0.0` when
    /// it cannot be determined.
    fn first_line_height(&self, node: &K) -> f64;
}
