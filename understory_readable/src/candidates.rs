// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered, non-nesting list of readable elements produced by extraction.

use alloc::vec::Vec;

use understory_document::DocumentLookup;

/// Readable elements in document order.
///
/// Produced by [`Extractor::extract`](crate::Extractor::extract). No element in
/// the list is an ancestor of another; see [`CandidateList::is_non_nesting`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateList<K> {
    items: Vec<K>,
}

impl<K> Default for CandidateList<K> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<K> CandidateList<K> {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, node: K) {
        self.items.push(node);
    }

    /// Elements in document order.
    pub fn as_slice(&self) -> &[K] {
        &self.items
    }

    /// Iterate elements in document order.
    pub fn iter(&self) -> core::slice::Iter<'_, K> {
        self.items.iter()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the list, returning the elements.
    pub fn into_vec(self) -> Vec<K> {
        self.items
    }
}

impl<K: PartialEq> CandidateList<K> {
    /// Returns true if `node` was extracted.
    pub fn contains(&self, node: &K) -> bool {
        self.items.contains(node)
    }

    /// Document-order position of `node`.
    pub fn position(&self, node: &K) -> Option<usize> {
        self.items.iter().position(|k| k == node)
    }
}

impl<K: Copy + PartialEq> CandidateList<K> {
    /// Check that no element is an ancestor of another (or listed twice).
    ///
    /// Quadratic in list length times depth; intended for tests and debug assertions.
    pub fn is_non_nesting<D: DocumentLookup<K>>(&self, doc: &D) -> bool {
        for (i, a) in self.items.iter().enumerate() {
            if self.items[i + 1..].contains(a) {
                return false;
            }
            let mut cur = doc.parent(a);
            while let Some(p) = cur {
                if self.items.contains(&p) {
                    return false;
                }
                cur = doc.parent(&p);
            }
        }
        true
    }
}

impl<K> From<Vec<K>> for CandidateList<K> {
    fn from(items: Vec<K>) -> Self {
        Self { items }
    }
}

impl<'a, K> IntoIterator for &'a CandidateList<K> {
    type Item = &'a K;
    type IntoIter = core::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<K> IntoIterator for CandidateList<K> {
    type Item = K;
    type IntoIter = alloc::vec::IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
