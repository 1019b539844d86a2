// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Readable-element extraction.
//!
//! ## Walk
//!
//! Starting at the children of the root, each sibling is classified:
//!
//! - No significant children: dead branch, skipped with its subtree.
//! - Significant children but no direct text: a wrapper; the walk descends into it.
//! - Direct text: a terminal. It is promoted through single-child ancestors and
//!   recorded unless the promoted element is ignored. The walk never descends
//!   below a terminal, so recorded elements never nest.
//!
//! The accumulator lives on the stack of [`Extractor::extract`]; nothing survives
//! between calls.

use understory_document::{Document, DocumentLookup, NodeId};

use crate::candidates::CandidateList;
use crate::predicates::{
    collapse_single_child_ancestors, has_direct_text, is_ignored, significant_child_count,
};
use crate::tags::TagTable;

/// What to do when promotion lands on an ignored ancestor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum IgnoredPromotion {
    /// Drop the terminal entirely.
    #[default]
    Drop,
    /// Record the pre-promotion terminal instead, unless it is ignored too.
    KeepTerminal,
}

/// Extraction settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Tag classification; only [`TagClass::IGNORED`](crate::TagClass::IGNORED) is consulted here.
    pub tags: TagTable,
    /// Policy for promoted elements that land on an ignored tag.
    pub ignored_promotion: IgnoredPromotion,
}

/// Finds top-level readable elements in a document tree.
#[derive(Clone, Debug, Default)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    /// Create an extractor with the given configuration.
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extract readable elements below `root`, in pre-order.
    ///
    /// `root` itself is never classified; the walk starts at its children.
    /// The tree must be acyclic.
    pub fn extract<K, D>(&self, doc: &D, root: K) -> CandidateList<K>
    where
        K: Copy + PartialEq + core::fmt::Debug,
        D: DocumentLookup<K>,
    {
        let mut out = CandidateList::new();
        self.walk(doc, doc.children(&root), &mut out);
        tracing::debug!(count = out.len(), "extracted readable elements");
        out
    }

    fn walk<K, D>(&self, doc: &D, siblings: &[K], out: &mut CandidateList<K>)
    where
        K: Copy + PartialEq + core::fmt::Debug,
        D: DocumentLookup<K>,
    {
        let tags = &self.config.tags;
        for node in siblings {
            if significant_child_count(doc, tags, node) == 0 {
                continue;
            }
            if has_direct_text(doc, node) {
                self.accept(doc, *node, out);
            } else {
                self.walk(doc, doc.children(node), out);
            }
        }
    }

    fn accept<K, D>(&self, doc: &D, terminal: K, out: &mut CandidateList<K>)
    where
        K: Copy + PartialEq + core::fmt::Debug,
        D: DocumentLookup<K>,
    {
        let tags = &self.config.tags;
        let promoted = collapse_single_child_ancestors(doc, terminal);
        let chosen = if !is_ignored(doc, tags, &promoted) {
            Some(promoted)
        } else {
            match self.config.ignored_promotion {
                IgnoredPromotion::Drop => None,
                IgnoredPromotion::KeepTerminal => {
                    Some(terminal).filter(|t| *t != promoted && !is_ignored(doc, tags, t))
                }
            }
        };
        match chosen {
            Some(node) => {
                tracing::trace!(?terminal, ?node, "readable element");
                out.push(node);
            }
            None => tracing::trace!(?terminal, ?promoted, "dropped ignored element"),
        }
    }
}

/// Extract readable elements below `root` with the default configuration.
///
/// ```
/// use understory_document::Document;
/// use understory_readable::extract;
///
/// let mut doc = Document::new();
/// let body = doc.insert_element(None, "BODY");
/// let h1 = doc.insert_element(Some(body), "H1");
/// doc.insert_text(Some(h1), "Title");
/// let div = doc.insert_element(Some(body), "DIV");
/// let quote = doc.insert_element(Some(div), "BLOCKQUOTE");
/// doc.insert_text(Some(quote), "Quoted text");
///
/// let found = extract(&doc, body);
/// assert_eq!(found.as_slice(), &[div]);
/// ```
pub fn extract<K, D>(doc: &D, root: K) -> CandidateList<K>
where
    K: Copy + PartialEq + core::fmt::Debug,
    D: DocumentLookup<K>,
{
    Extractor::default().extract(doc, root)
}

/// Extract readable elements of a whole [`Document`].
///
/// Starts at the first `BODY` element when there is one, otherwise walks every
/// root as if it were a child of an implicit container.
pub fn extract_document(extractor: &Extractor, doc: &Document) -> CandidateList<NodeId> {
    if let Some(body) = doc.first_element_by_tag("BODY") {
        return extractor.extract(doc, body);
    }
    let mut out = CandidateList::new();
    extractor.walk(doc, &doc.roots(), &mut out);
    tracing::debug!(count = out.len(), "extracted readable elements without a BODY");
    out
}
