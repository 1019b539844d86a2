// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node predicates used by extraction.
//!
//! All predicates are total: stale keys behave like empty, untagged nodes.

use understory_document::{DocumentLookup, NodeKind};

use crate::tags::TagTable;

fn is_text<K, D: DocumentLookup<K>>(doc: &D, node: &K) -> bool {
    doc.kind(node) == Some(NodeKind::Text)
}

/// A text node whose trimmed content is empty.
pub fn is_empty_text<K, D: DocumentLookup<K>>(doc: &D, node: &K) -> bool {
    is_text(doc, node) && doc.text(node).is_none_or(|t| t.trim().is_empty())
}

/// A text node with non-empty trimmed content.
pub fn is_non_empty_text<K, D: DocumentLookup<K>>(doc: &D, node: &K) -> bool {
    is_text(doc, node) && doc.text(node).is_some_and(|t| !t.trim().is_empty())
}

/// A non-text node with no children, or whose only child is empty text.
pub fn is_empty_element<K, D: DocumentLookup<K>>(doc: &D, node: &K) -> bool {
    if is_text(doc, node) {
        return false;
    }
    match doc.children(node) {
        [] => true,
        [only] => is_empty_text(doc, only),
        _ => false,
    }
}

/// An element whose tag is in the ignore set.
pub fn is_ignored<K, D: DocumentLookup<K>>(doc: &D, tags: &TagTable, node: &K) -> bool {
    doc.tag_name(node).is_some_and(|t| tags.is_ignored(t))
}

/// Number of direct children that are neither empty text, empty elements, nor ignored.
///
/// A node with a count of zero is a dead branch for extraction.
pub fn significant_child_count<K, D: DocumentLookup<K>>(
    doc: &D,
    tags: &TagTable,
    node: &K,
) -> usize {
    doc.children(node)
        .iter()
        .filter(|c| {
            !is_empty_text(doc, *c) && !is_empty_element(doc, *c) && !is_ignored(doc, tags, *c)
        })
        .count()
}

/// At least one direct child is a text node with non-empty trimmed content.
pub fn has_direct_text<K, D: DocumentLookup<K>>(doc: &D, node: &K) -> bool {
    doc.children(node)
        .iter()
        .any(|c| is_non_empty_text(doc, c))
}

/// Number of direct element children, ignoring text nodes.
pub fn element_child_count<K, D: DocumentLookup<K>>(doc: &D, node: &K) -> usize {
    doc.children(node)
        .iter()
        .filter(|c| doc.kind(*c).is_some_and(NodeKind::is_element))
        .count()
}

/// Walk upward from `node` while the parent has exactly one element child.
///
/// Returns the widest ancestor reachable through single-child wrappers, or
/// `node` itself when its parent has several element children. Stops at the
/// first node without a parent, so detached subtrees are safe to walk.
pub fn collapse_single_child_ancestors<K: Copy, D: DocumentLookup<K>>(doc: &D, node: K) -> K {
    let mut cur = node;
    while let Some(parent) = doc.parent(&cur) {
        if element_child_count(doc, &parent) != 1 {
            break;
        }
        cur = parent;
    }
    cur
}
