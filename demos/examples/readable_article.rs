// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Readable-element extraction on a small article.
//!
//! Builds a document with headings, wrappers, and empty sections, then prints
//! the readable elements found with the default and a relaxed ignore set.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example readable_article`

use understory_document::{Document, NodeId};
use understory_readable::{ExtractConfig, Extractor, TagClass, TagTable, extract_document};

fn text_el(doc: &mut Document, parent: NodeId, tag: &str, text: &str) -> NodeId {
    let el = doc.insert_element(Some(parent), tag);
    doc.insert_text(Some(el), text);
    el
}

fn describe(doc: &Document, id: NodeId) -> String {
    let tag = doc.tag_name(id).unwrap_or("#text");
    let text: String = doc
        .children(id)
        .iter()
        .filter_map(|c| doc.text(*c))
        .collect::<Vec<_>>()
        .join(" ");
    format!("<{tag}> {:?}", text.trim())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new();
    let html = doc.insert_element(None, "html");
    let head = doc.insert_element(Some(html), "head");
    text_el(&mut doc, head, "title", "An Interesting HTML Document");
    let body = doc.insert_element(Some(html), "body");
    let _root = doc.insert_element(Some(body), "div");
    let content = doc.insert_element(Some(body), "div");
    let article = doc.insert_element(Some(content), "article");
    let header = doc.insert_element(Some(article), "header");
    text_el(&mut doc, header, "h1", "An Interesting HTML Document");
    let byline = doc.insert_element(Some(header), "span");
    text_el(&mut doc, byline, "address", "John Doe");
    let _empty = doc.insert_element(Some(article), "section");
    let intro = doc.insert_element(Some(article), "div");
    text_el(&mut doc, intro, "blockquote", "Readability is a property of blocks.");
    text_el(&mut doc, article, "p", "A paragraph with plenty of words in it.");
    text_el(&mut doc, article, "pre", "fn main() {}");

    let strict = Extractor::default();
    println!("== Default ignore set ==");
    for id in &extract_document(&strict, &doc) {
        println!("  {}", describe(&doc, *id));
    }

    let relaxed = Extractor::new(ExtractConfig {
        tags: TagTable::default().without("span", TagClass::IGNORED),
        ..Default::default()
    });
    let found = extract_document(&relaxed, &doc);
    println!("== SPAN allowed ==");
    for id in &found {
        println!("  {}", describe(&doc, *id));
    }
    assert!(found.is_non_nesting(&doc));
    assert_eq!(found.position(&byline), Some(0), "address promotes to its span");
}
