// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover resolution driven by a pointer feed.
//!
//! Lays out three paragraphs, attaches a resolver to a window-wide pointer feed,
//! publishes a few pointer positions, and prints the resulting transitions and
//! overlay anchors.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example hover_pointer`

use kurbo::{Point, Rect, Vec2};
use understory_document::Document;
use understory_hover::{AttachError, HoverResolver, PointerFeed};
use understory_readable::extract;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new();
    let body = doc.insert_element(None, "body");
    let mut paragraphs = Vec::new();
    for (i, text) in ["First.", "Second.", "Third."].into_iter().enumerate() {
        let p = doc.insert_element(Some(body), "p");
        doc.insert_text(Some(p), text);
        let y = i as f64 * 60.0;
        doc.set_bounds(p, Some(Rect::new(20.0, y, 620.0, y + 48.0)));
        doc.set_first_line_height(p, 24.0);
        paragraphs.push(p);
    }

    let feed = PointerFeed::new();
    let mut hover = HoverResolver::new();
    hover.attach(&feed).unwrap();
    assert_eq!(hover.attach(&feed), Err(AttachError::AlreadyAttached));
    hover.set_candidates(extract(&doc, body), &doc);

    for pt in [
        Point::new(100.0, 10.0),
        Point::new(100.0, 30.0),
        Point::new(100.0, 54.0),
        Point::new(100.0, 70.0),
    ] {
        feed.publish(pt);
        let events = hover.poll(&doc);
        let anchor = hover
            .target()
            .map(|t| (t.left, t.top, t.height_of_first_line));
        println!("pointer {pt:?}: {events:?} anchor={anchor:?}");
    }
    assert_eq!(hover.target().map(|t| t.element), Some(paragraphs[1]));

    // Scrolling moves every box; the pointer stays put in document space.
    doc.set_scroll_offset(Vec2::new(0.0, 60.0));
    let events = hover.refresh(&doc);
    println!("after scroll: {events:?}");
    assert_eq!(hover.target().map(|t| t.element), Some(paragraphs[0]));

    drop(hover);
    assert_eq!(feed.listener_count(), 0);
}
