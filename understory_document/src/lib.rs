// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Document: a Kurbo-native document tree arena.
//!
//! This crate holds the rendered document that readable-block extraction and
//! hover resolution run against.
//!
//! - Represents a hierarchy of element and text nodes with ordered children and
//!   non-owning parent back-references.
//! - Stores the client-space box reported by layout and a first-line height per node,
//!   and derives absolute document geometry by adding the scroll offset.
//! - Exposes the tree through the [`DocumentLookup`] and [`GeometryOracle`] traits so
//!   downstream crates do not depend on this arena.
//!
//! ## Not a layout engine
//!
//! This crate does not measure text or lay out boxes.
//! Upstream code is expected to compute bounds using whatever layout system you
//! choose and write the resulting boxes into the document.
//!
//! ## API overview
//!
//! - [`Document`]: container managing nodes, parent links, and geometry.
//! - [`NodeId`]: generational handle of a node.
//! - [`NodeKind`]: element or text.
//! - [`DocumentLookup`]: read-only structural view, implemented by [`Document`].
//! - [`GeometryOracle`]: absolute boxes and first-line heights, implemented by [`Document`].
//!
//! ### Minimal usage
//!
//! ```
//! use understory_document::{Document, GeometryOracle};
//! use kurbo::{Rect, Vec2};
//!
//! let mut doc = Document::new();
//! let body = doc.insert_element(None, "body");
//! let p = doc.insert_element(Some(body), "p");
//! let _text = doc.insert_text(Some(p), "Hello, world.");
//!
//! doc.set_bounds(p, Some(Rect::new(0.0, 0.0, 200.0, 40.0)));
//! doc.set_scroll_offset(Vec2::new(0.0, 100.0));
//!
//! assert_eq!(doc.tag_name(p), Some("P"));
//! assert_eq!(doc.bounding_box(&p), Some(Rect::new(0.0, 100.0, 200.0, 140.0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod lookup;
mod tree;
mod types;

pub use lookup::{DocumentLookup, GeometryOracle};
pub use tree::Document;
pub use types::{NodeId, NodeKind};
