// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag classification: which tags are never readable, and which hold a text block.

use alloc::string::String;
use alloc::vec::Vec;

bitflags::bitflags! {
    /// Classification bits attached to a tag name.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TagClass: u8 {
        /// Elements with this tag are never selected as readable elements.
        const IGNORED    = 0b0000_0001;
        /// Elements with this tag lay out a paragraph-like block of text; the
        /// first-line metric is taken from the innermost such element.
        const TEXT_BLOCK = 0b0000_0010;
    }
}

impl Default for TagClass {
    fn default() -> Self {
        Self::empty()
    }
}

/// Tags that are never selected: headings, interactive controls, inline wrappers,
/// images, preformatted code, and scripts.
pub const DEFAULT_IGNORED: &[&str] = &[
    "H1", "H2", "H3", "H4", "H5", "H6", "BUTTON", "LABEL", "SPAN", "IMG", "PRE", "SCRIPT",
];

/// Paragraph- and quote-like tags.
pub const DEFAULT_TEXT_BLOCKS: &[&str] = &[
    "P",
    "BLOCKQUOTE",
    "Q",
    "LI",
    "DD",
    "DT",
    "FIGCAPTION",
    "TD",
    "TH",
];

/// Case-insensitive table from tag name to [`TagClass`].
///
/// Built once and then shared read-only by extraction and hover resolution.
///
/// ```
/// use understory_readable::{TagClass, TagTable};
///
/// let tags = TagTable::default().with_ignored("nav").without("span", TagClass::IGNORED);
/// assert!(tags.is_ignored("NAV"));
/// assert!(!tags.is_ignored("span"));
/// assert!(tags.is_text_block("p"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagTable {
    entries: Vec<(String, TagClass)>,
}

impl Default for TagTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for tag in DEFAULT_IGNORED {
            table.insert(tag, TagClass::IGNORED);
        }
        for tag in DEFAULT_TEXT_BLOCKS {
            table.insert(tag, TagClass::TEXT_BLOCK);
        }
        table
    }
}

impl TagTable {
    /// A table that classifies nothing.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add `tag` to the ignore set.
    #[must_use]
    pub fn with_ignored(mut self, tag: &str) -> Self {
        self.insert(tag, TagClass::IGNORED);
        self
    }

    /// Mark `tag` as a text block.
    #[must_use]
    pub fn with_text_block(mut self, tag: &str) -> Self {
        self.insert(tag, TagClass::TEXT_BLOCK);
        self
    }

    /// Clear the given classification bits from `tag`.
    #[must_use]
    pub fn without(mut self, tag: &str, class: TagClass) -> Self {
        if let Some(i) = self.position(tag) {
            self.entries[i].1.remove(class);
            if self.entries[i].1.is_empty() {
                self.entries.remove(i);
            }
        }
        self
    }

    /// Classification of `tag`; empty for unknown tags.
    pub fn classify(&self, tag: &str) -> TagClass {
        self.position(tag)
            .map(|i| self.entries[i].1)
            .unwrap_or_default()
    }

    /// Returns true if `tag` is in the ignore set.
    pub fn is_ignored(&self, tag: &str) -> bool {
        self.classify(tag).contains(TagClass::IGNORED)
    }

    /// Returns true if `tag` is a text-block tag.
    pub fn is_text_block(&self, tag: &str) -> bool {
        self.classify(tag).contains(TagClass::TEXT_BLOCK)
    }

    /// Tags carrying any of the bits in `class`, uppercased, in insertion order.
    pub fn tags(&self, class: TagClass) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(move |(_, c)| c.intersects(class))
            .map(|(t, _)| t.as_str())
    }

    fn insert(&mut self, tag: &str, class: TagClass) {
        match self.position(tag) {
            Some(i) => self.entries[i].1.insert(class),
            None => self.entries.push((tag.to_ascii_uppercase(), class)),
        }
    }

    fn position(&self, tag: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(t, _)| t.eq_ignore_ascii_case(tag))
    }
}
