// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Readable: find the top-level readable blocks of a document.
//!
//! ## Overview
//!
//! A readable element is a block of text a pointer-driven affordance (for example
//! a "read this aloud" control) can attach to. Extraction walks a document tree
//! once and returns a flat [`CandidateList`] such that:
//!
//! 1. every element has direct, non-whitespace text, or was promoted from one that does;
//! 2. no element has a tag in the ignore set (headings, controls, images, scripts, ...);
//! 3. an element whose parent has exactly one element child is replaced by that parent,
//!    so `<div><blockquote>text</blockquote></div>` yields the `div`;
//! 4. no element contains another.
//!
//! The walk is written against [`DocumentLookup`](understory_document::DocumentLookup),
//! so any host tree can be used. It does not consult geometry.
//!
//! ## Configuration
//!
//! [`TagTable`] classifies tags with [`TagClass`] bits. The default table ignores
//! `H1`–`H6`, `BUTTON`, `LABEL`, `SPAN`, `IMG`, `PRE`, and `SCRIPT`, and marks
//! paragraph- and quote-like tags as text blocks for first-line measurement.
//! [`ExtractConfig`] pairs the table with an [`IgnoredPromotion`] policy.
//!
//! ## Example
//!
//! ```
//! use understory_document::Document;
//! use understory_readable::{ExtractConfig, Extractor, TagTable};
//!
//! let mut doc = Document::new();
//! let body = doc.insert_element(None, "body");
//! let nav = doc.insert_element(Some(body), "nav");
//! doc.insert_text(Some(nav), "Home | About");
//! let p = doc.insert_element(Some(body), "p");
//! doc.insert_text(Some(p), "First paragraph.");
//!
//! let extractor = Extractor::new(ExtractConfig {
//!     tags: TagTable::default().with_ignored("nav"),
//!     ..Default::default()
//! });
//! let found = extractor.extract(&doc, body);
//! assert_eq!(found.as_slice(), &[p]);
//! assert!(found.is_non_nesting(&doc));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod candidates;
mod extract;
pub mod predicates;
mod tags;

pub use candidates::CandidateList;
pub use extract::{ExtractConfig, Extractor, IgnoredPromotion, extract, extract_document};
pub use tags::{DEFAULT_IGNORED, DEFAULT_TEXT_BLOCKS, TagClass, TagTable};
