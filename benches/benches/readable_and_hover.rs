// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_document::{Document, NodeId};
use understory_hover::HoverResolver;
use understory_readable::{CandidateList, extract};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A long article: `sections` sections, each with a heading, a wrapped quote,
/// and a handful of laid-out paragraphs stacked vertically.
fn gen_article(sections: usize) -> (Document, NodeId, f64) {
    let mut doc = Document::new();
    let body = doc.insert_element(None, "BODY");
    let mut y = 0.0;
    for s in 0..sections {
        let section = doc.insert_element(Some(body), "SECTION");
        doc.insert_text(Some(section), "\n  ");
        let h2 = doc.insert_element(Some(section), "H2");
        doc.insert_text(Some(h2), "Heading");
        let wrap = doc.insert_element(Some(section), "DIV");
        let quote = doc.insert_element(Some(wrap), "BLOCKQUOTE");
        doc.insert_text(Some(quote), "A quoted passage.");
        doc.set_bounds(wrap, Some(Rect::new(0.0, y, 800.0, y + 40.0)));
        y += 48.0;
        for p in 0..(3 + s % 4) {
            let para = doc.insert_element(Some(section), "P");
            doc.insert_text(Some(para), "Some body copy ");
            let em = doc.insert_element(Some(para), "EM");
            doc.insert_text(Some(em), "with emphasis");
            doc.insert_text(Some(para), " and more words.");
            doc.set_bounds(para, Some(Rect::new(0.0, y, 800.0, y + 60.0)));
            doc.set_first_line_height(para, 20.0 + p as f64);
            y += 68.0;
        }
    }
    (doc, body, y)
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    for &sections in &[10_usize, 100, 1_000] {
        let (doc, body, _) = gen_article(sections);
        group.throughput(Throughput::Elements(sections as u64));
        group.bench_function(format!("article_{sections}"), |b| {
            b.iter(|| black_box(extract(&doc, black_box(body))));
        });
    }
    group.finish();
}

fn bench_hover(c: &mut Criterion) {
    let mut group = c.benchmark_group("hover");
    for &sections in &[10_usize, 100, 1_000] {
        let (doc, body, height) = gen_article(sections);
        let candidates: CandidateList<NodeId> = extract(&doc, body);
        let mut rng = Rng::new(0x9E37_79B9_7F4A_7C15);
        let points: Vec<Point> = (0..256)
            .map(|_| Point::new(rng.next_f64() * 800.0, rng.next_f64() * height))
            .collect();
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("pointer_moves_{sections}"), |b| {
            b.iter_batched(
                || {
                    let mut hover = HoverResolver::new();
                    hover.set_candidates(candidates.clone(), &doc);
                    hover
                },
                |mut hover| {
                    for pt in &points {
                        black_box(hover.pointer_moved(*pt, &doc));
                    }
                    hover
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract, bench_hover);
criterion_main!(benches);
