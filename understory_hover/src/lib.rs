// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Hover: resolve which readable block is under the pointer.
//!
//! ## Overview
//!
//! Given a [`CandidateList`](understory_readable::CandidateList) from
//! `understory_readable` and a stream of absolute pointer positions,
//! [`HoverResolver`] keeps a single piece of derived state: the
//! [`HoverTarget`] under the pointer, or none. The target carries the
//! element's top-left corner and the height of its first line of text, which is
//! what an overlay control needs to anchor itself beside the block.
//!
//! ## Resolution
//!
//! - Candidates are scanned in document order; the first whose absolute box
//!   contains the pointer wins.
//! - Containment is inclusive on all four edges ([`rect_contains_inclusive`]).
//! - Candidates without geometry never match.
//! - The first-line height is measured on the innermost text block found by
//!   descending through first element children ([`text_block_for`]), or on
//!   the candidate itself when there is none.
//!
//! Geometry comes from a [`GeometryOracle`](understory_document::GeometryOracle);
//! structure from a [`DocumentLookup`](understory_document::DocumentLookup).
//! [`Document`](understory_document::Document) implements both.
//!
//! ## Pointer input
//!
//! Hosts either push positions directly with [`HoverResolver::pointer_moved`],
//! or publish them to a window-wide [`PointerFeed`] and let the resolver
//! [`poll`](HoverResolver::poll) its [`Subscription`]. A resolver attaches to
//! a feed at most once ([`AttachError::AlreadyAttached`]) and releases the
//! subscription on [`detach`](HoverResolver::detach) or drop.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_document::Document;
//! use understory_hover::{HoverEvent, HoverResolver, PointerFeed};
//! use understory_readable::extract;
//!
//! let mut doc = Document::new();
//! let body = doc.insert_element(None, "BODY");
//! let div = doc.insert_element(Some(body), "DIV");
//! let p = doc.insert_element(Some(div), "P");
//! doc.insert_text(Some(p), "A paragraph.");
//! let aside = doc.insert_element(Some(body), "ASIDE");
//! doc.insert_text(Some(aside), "A note.");
//! doc.set_bounds(div, Some(Rect::new(0.0, 0.0, 300.0, 60.0)));
//! doc.set_first_line_height(p, 18.0);
//!
//! let feed = PointerFeed::new();
//! let mut hover = HoverResolver::new();
//! hover.attach(&feed).unwrap();
//! hover.set_candidates(extract(&doc, body), &doc);
//!
//! feed.publish(Point::new(20.0, 20.0));
//! assert_eq!(hover.poll(&doc), vec![HoverEvent::Enter(div)]);
//!
//! let target = hover.target().unwrap();
//! assert_eq!((target.left, target.top), (0.0, 0.0));
//! assert_eq!(target.height_of_first_line, 18.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod geometry;
mod pointer;
mod resolver;

pub use geometry::{contains_point, first_line_height, rect_contains_inclusive, text_block_for};
pub use pointer::{PointerFeed, Subscription};
pub use resolver::{AttachError, HoverEvent, HoverResolver, HoverTarget};
