// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, updates, queries.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Rect, Vec2};

use crate::lookup::{DocumentLookup, GeometryOracle};
use crate::types::{NodeId, NodeKind};

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena-backed document tree.
///
/// Nodes are addressed by generational [`NodeId`]s. Each node keeps a
/// non-owning parent back-reference and an ordered child list, plus the
/// client-space bounds reported by layout. Absolute geometry is derived on
/// demand by adding the document scroll offset.
pub struct Document {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    scroll_offset: Vec2,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("scroll_offset", &self.scroll_offset)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    kind: NodeKind,
    tag: Option<String>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    client_bounds: Option<Rect>,
    first_line_height: f64,
}

impl Node {
    fn new(generation: u32, kind: NodeKind, tag: Option<String>, text: Option<String>) -> Self {
        Self {
            generation,
            kind,
            tag,
            text,
            parent: None,
            children: Vec::new(),
            client_bounds: None,
            first_line_height: 0.0,
        }
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            scroll_offset: Vec2::ZERO,
        }
    }

    /// Insert an element as the last child of `parent` (or as a root if `None`).
    ///
    /// The tag is stored ASCII-uppercased, the way HTML documents report `tagName`.
    pub fn insert_element(&mut self, parent: Option<NodeId>, tag: &str) -> NodeId {
        let node = |generation| {
            Node::new(
                generation,
                NodeKind::Element,
                Some(tag.to_ascii_uppercase()),
                None,
            )
        };
        self.insert_with(parent, node)
    }

    /// Insert a text node as the last child of `parent` (or as a root if `None`).
    pub fn insert_text(&mut self, parent: Option<NodeId>, text: &str) -> NodeId {
        let node = |generation| Node::new(generation, NodeKind::Text, None, Some(String::from(text)));
        self.insert_with(parent, node)
    }

    fn insert_with(&mut self, parent: Option<NodeId>, make: impl FnOnce(u32) -> Node) -> NodeId {
        let parent = parent.filter(|p| self.is_alive(*p));
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(make(generation));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(make(generation)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node (and its subtree) from the document.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` under `new_parent`, or detach it into a standalone root with `None`.
    ///
    /// Moving a node under itself or one of its descendants would form a cycle
    /// and is ignored.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent {
            if !self.is_alive(p) || p == id || self.is_ancestor_of(id, p) {
                return;
            }
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Replace the payload of a text node. Elements are left untouched.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            if n.kind.is_text() {
                n.text = Some(String::from(text));
            }
        }
    }

    /// Update the client-space bounds reported by layout (before scrolling).
    ///
    /// `None` marks the node as unmeasured; it then never contains a point.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Option<Rect>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.client_bounds = bounds;
        }
    }

    /// Update the rendered first-line height of a node.
    pub fn set_first_line_height(&mut self, id: NodeId, height: f64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.first_line_height = height;
        }
    }

    /// Update the document scroll offset added to every client-space box.
    pub fn set_scroll_offset(&mut self, offset: Vec2) {
        self.scroll_offset = offset;
    }

    /// Current document scroll offset.
    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll_offset
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Kind of a live node.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node_opt(id).map(|n| n.kind)
    }

    /// Uppercased tag name of a live element.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).and_then(|n| n.tag.as_deref())
    }

    /// Text payload of a live text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).and_then(|n| n.text.as_deref())
    }

    /// Parent of a live node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Direct children of a live node, in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Direct element children of a live node, skipping text nodes.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.kind(*c).is_some_and(NodeKind::is_element))
    }

    /// Live nodes without a parent, in slot order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| match n {
                Some(n) if n.parent.is_none() =>
                {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "NodeId uses 32-bit indices by design."
                    )]
                    Some(NodeId::new(i as u32, n.generation))
                }
                _ => None,
            })
            .collect()
    }

    /// Path from the root to `id` (inclusive). Empty for stale ids.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = Some(id).filter(|id| self.is_alive(*id));
        while let Some(n) = cur {
            out.push(n);
            cur = self.parent(n);
        }
        out.reverse();
        out
    }

    /// Returns true if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = self.parent(node);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// First element with the given tag in pre-order over all roots.
    ///
    /// The comparison is ASCII case-insensitive.
    pub fn first_element_by_tag(&self, tag: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.roots();
        stack.reverse();
        while let Some(id) = stack.pop() {
            if self
                .tag_name(id)
                .is_some_and(|t| t.eq_ignore_ascii_case(tag))
            {
                return Some(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        None
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

impl DocumentLookup<NodeId> for Document {
    fn kind(&self, node: &NodeId) -> Option<NodeKind> {
        Self::kind(self, *node)
    }

    fn tag_name(&self, node: &NodeId) -> Option<&str> {
        Self::tag_name(self, *node)
    }

    fn text(&self, node: &NodeId) -> Option<&str> {
        Self::text(self, *node)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        Self::parent(self, *node)
    }

    fn children(&self, node: &NodeId) -> &[NodeId] {
        Self::children(self, *node)
    }
}

impl GeometryOracle<NodeId> for Document {
    fn bounding_box(&self, node: &NodeId) -> Option<Rect> {
        let bounds = self.node_opt(*node)?.client_bounds?;
        Some(bounds + self.scroll_offset)
    }

    fn first_line_height(&self, node: &NodeId) -> f64 {
        self.node_opt(*node)
            .map(|n| n.first_line_height)
            .unwrap_or(0.0)
    }
}
