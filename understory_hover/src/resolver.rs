// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover resolver: derived hover state over a candidate list and a pointer.
//!
//! ## Dependencies
//!
//! The hover target depends on exactly two inputs, the [`CandidateList`] and
//! the latest pointer position. Every call that changes either one
//! ([`HoverResolver::set_candidates`], [`HoverResolver::pointer_moved`],
//! [`HoverResolver::pointer_left`], [`HoverResolver::poll`]) recomputes the
//! target synchronously before returning. [`HoverResolver::refresh`] recomputes
//! without changing inputs, for when layout or scrolling moved the boxes.
//!
//! ## Transitions
//!
//! Each recomputation returns the [`HoverEvent`]s needed to move from the old
//! target to the new one: `Leave(old)` then `Enter(new)`, or nothing when the
//! hovered element did not change.

use alloc::vec::Vec;

use kurbo::Point;
use understory_document::{DocumentLookup, GeometryOracle};
use understory_readable::{CandidateList, TagTable};

use crate::geometry::{first_line_height, rect_contains_inclusive};
use crate::pointer::{PointerFeed, Subscription};

/// The candidate under the pointer, with placement metadata for an overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HoverTarget<K> {
    /// Hovered readable element.
    pub element: K,
    /// Top edge of the element's absolute box.
    pub top: f64,
    /// Left edge of the element's absolute box.
    pub left: f64,
    /// Rendered height of the first line of the element's text block.
    pub height_of_first_line: f64,
}

impl<K> HoverTarget<K> {
    /// Top-left corner as a point.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// A hover transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The pointer entered the given element.
    Enter(K),
    /// The pointer left the given element.
    Leave(K),
}

/// Errors from attaching a resolver to a pointer feed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    /// The resolver already holds a subscription; detach it first.
    #[error("hover resolver is already attached to a pointer feed")]
    AlreadyAttached,
}

/// Maintains the hover target for a list of readable elements.
///
/// ```
/// use kurbo::{Point, Rect};
/// use understory_document::Document;
/// use understory_hover::{HoverEvent, HoverResolver};
/// use understory_readable::extract;
///
/// let mut doc = Document::new();
/// let body = doc.insert_element(None, "BODY");
/// let p = doc.insert_element(Some(body), "P");
/// doc.insert_text(Some(p), "Hello.");
/// let q = doc.insert_element(Some(body), "P");
/// doc.insert_text(Some(q), "Bye.");
/// doc.set_bounds(p, Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
///
/// let mut hover = HoverResolver::new();
/// hover.set_candidates(extract(&doc, body), &doc);
///
/// let events = hover.pointer_moved(Point::new(50.0, 50.0), &doc);
/// assert_eq!(events, vec![HoverEvent::Enter(p)]);
/// assert_eq!(hover.target().map(|t| t.element), Some(p));
///
/// let events = hover.pointer_moved(Point::new(500.0, 500.0), &doc);
/// assert_eq!(events, vec![HoverEvent::Leave(p)]);
/// assert!(hover.target().is_none());
/// ```
#[derive(Debug)]
pub struct HoverResolver<K> {
    tags: TagTable,
    candidates: CandidateList<K>,
    pointer: Option<Point>,
    target: Option<HoverTarget<K>>,
    subscription: Option<Subscription>,
}

impl<K> Default for HoverResolver<K> {
    fn default() -> Self {
        Self::with_tags(TagTable::default())
    }
}

impl<K> HoverResolver<K> {
    /// Create a resolver with the default tag table and no candidates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver that uses `tags` to find text blocks for first-line measurement.
    pub fn with_tags(tags: TagTable) -> Self {
        Self {
            tags,
            candidates: CandidateList::new(),
            pointer: None,
            target: None,
            subscription: None,
        }
    }

    /// Current hover target, or `None` when no candidate is under the pointer.
    pub fn target(&self) -> Option<&HoverTarget<K>> {
        self.target.as_ref()
    }

    /// Candidates currently tracked.
    pub fn candidates(&self) -> &CandidateList<K> {
        &self.candidates
    }

    /// Latest pointer position, or `None` before the first move or after it left.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Subscribe to `feed`. Each resolver holds at most one subscription.
    ///
    /// The subscription is released by [`detach`](Self::detach) or when the
    /// resolver is dropped.
    pub fn attach(&mut self, feed: &PointerFeed) -> Result<(), AttachError> {
        if self.subscription.is_some() {
            return Err(AttachError::AlreadyAttached);
        }
        self.subscription = Some(feed.subscribe());
        Ok(())
    }

    /// Release the feed subscription. Returns false if none was held.
    pub fn detach(&mut self) -> bool {
        self.subscription.take().is_some()
    }

    /// Returns true while holding a feed subscription.
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }
}

impl<K: Copy + PartialEq + core::fmt::Debug> HoverResolver<K> {
    /// Replace the candidate list and recompute.
    pub fn set_candidates<H>(
        &mut self,
        candidates: CandidateList<K>,
        host: &H,
    ) -> Vec<HoverEvent<K>>
    where
        H: DocumentLookup<K> + GeometryOracle<K>,
    {
        self.candidates = candidates;
        self.recompute(host)
    }

    /// Record a new pointer position and recompute.
    pub fn pointer_moved<H>(&mut self, pt: Point, host: &H) -> Vec<HoverEvent<K>>
    where
        H: DocumentLookup<K> + GeometryOracle<K>,
    {
        self.pointer = Some(pt);
        self.recompute(host)
    }

    /// Forget the pointer position (it left the window) and clear the target.
    pub fn pointer_left(&mut self) -> Vec<HoverEvent<K>> {
        self.pointer = None;
        let prev = self.target.take().map(|t| t.element);
        transitions(prev, None)
    }

    /// Consume the latest position published to the attached feed, if any, and recompute.
    ///
    /// Returns no events when nothing was published since the last poll or
    /// when the resolver is not attached.
    pub fn poll<H>(&mut self, host: &H) -> Vec<HoverEvent<K>>
    where
        H: DocumentLookup<K> + GeometryOracle<K>,
    {
        match self.subscription.as_ref().and_then(Subscription::take) {
            Some(pt) => self.pointer_moved(pt, host),
            None => Vec::new(),
        }
    }

    /// Recompute with unchanged inputs, e.g. after layout or scrolling moved boxes.
    pub fn refresh<H>(&mut self, host: &H) -> Vec<HoverEvent<K>>
    where
        H: DocumentLookup<K> + GeometryOracle<K>,
    {
        self.recompute(host)
    }

    /// Every candidate containing `pt`, in document order.
    ///
    /// Under the non-nesting invariant this has at most one element unless the
    /// document changed after extraction; the first entry is the one
    /// [`pointer_moved`](Self::pointer_moved) would pick.
    pub fn hits_at<G: GeometryOracle<K>>(&self, pt: Point, oracle: &G) -> Vec<K> {
        self.candidates
            .iter()
            .copied()
            .filter(|c| crate::geometry::contains_point(oracle, c, pt))
            .collect()
    }

    fn resolve<H>(&self, pt: Point, host: &H) -> Option<HoverTarget<K>>
    where
        H: DocumentLookup<K> + GeometryOracle<K>,
    {
        self.candidates.iter().find_map(|&element| {
            let rect = host.bounding_box(&element)?.abs();
            if !rect_contains_inclusive(rect, pt) {
                return None;
            }
            Some(HoverTarget {
                element,
                top: rect.y0,
                left: rect.x0,
                height_of_first_line: first_line_height(host, &self.tags, element),
            })
        })
    }

    fn recompute<H>(&mut self, host: &H) -> Vec<HoverEvent<K>>
    where
        H: DocumentLookup<K> + GeometryOracle<K>,
    {
        let next = self.pointer.and_then(|pt| self.resolve(pt, host));
        let prev = self.target.as_ref().map(|t| t.element);
        let next_element = next.as_ref().map(|t| t.element);
        self.target = next;
        transitions(prev, next_element)
    }
}

fn transitions<K: PartialEq + core::fmt::Debug>(
    prev: Option<K>,
    next: Option<K>,
) -> Vec<HoverEvent<K>> {
    if prev == next {
        return Vec::new();
    }
    tracing::debug!(?prev, ?next, "hover target changed");
    let mut out = Vec::with_capacity(2);
    if let Some(p) = prev {
        out.push(HoverEvent::Leave(p));
    }
    if let Some(n) = next {
        out.push(HoverEvent::Enter(n));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::{Rect, Vec2};
    use understory_document::{Document, NodeId};
    use understory_readable::extract;

    fn block(doc: &mut Document, parent: NodeId, tag: &str, text: &str, r: Rect) -> NodeId {
        let el = doc.insert_element(Some(parent), tag);
        doc.insert_text(Some(el), text);
        doc.set_bounds(el, Some(r));
        el
    }

    /// Far-away sibling so a lone block under `body` is not collapsed into it.
    fn spacer(doc: &mut Document, body: NodeId) -> NodeId {
        block(doc, body, "P", "Spacer", Rect::new(0.0, 1000.0, 100.0, 1100.0))
    }

    #[test]
    fn hover_enters_and_clears() {
        let mut doc = Document::new();
        let body = doc.insert_element(None, "BODY");
        let a = block(&mut doc, body, "P", "A", Rect::new(0.0, 0.0, 100.0, 100.0));
        let _b = block(&mut doc, body, "P", "B", Rect::new(0.0, 200.0, 100.0, 300.0));
        doc.set_first_line_height(a, 16.0);

        let mut hover = HoverResolver::new();
        assert!(hover.set_candidates(extract(&doc, body), &doc).is_empty());

        let ev = hover.pointer_moved(Point::new(50.0, 50.0), &doc);
        assert_eq!(ev, vec![HoverEvent::Enter(a)]);
        assert_eq!(
            hover.target().copied(),
            Some(HoverTarget {
                element: a,
                top: 0.0,
                left: 0.0,
                height_of_first_line: 16.0,
            })
        );

        let ev = hover.pointer_moved(Point::new(500.0, 500.0), &doc);
        assert_eq!(ev, vec![HoverEvent::Leave(a)]);
        assert!(hover.target().is_none());
    }

    #[test]
    fn same_target_emits_nothing() {
        let mut doc = Document::new();
        let body = doc.insert_element(None, "BODY");
        let a = block(&mut doc, body, "P", "A", Rect::new(0.0, 0.0, 100.0, 100.0));
        spacer(&mut doc, body);
        let mut hover = HoverResolver::new();
        hover.set_candidates(extract(&doc, body), &doc);

        assert_eq!(
            hover.pointer_moved(Point::new(1.0, 1.0), &doc),
            vec![HoverEvent::Enter(a)]
        );
        assert!(hover.pointer_moved(Point::new(2.0, 2.0), &doc).is_empty());
        assert_eq!(hover.pointer(), Some(Point::new(2.0, 2.0)));
    }

    #[test]
    fn switching_targets_leaves_then_enters() {
        let mut doc = Document::new();
        let body = doc.insert_element(None, "BODY");
        let a = block(&mut doc, body, "P", "A", Rect::new(0.0, 0.0, 100.0, 20.0));
        let b = block(&mut doc, body, "P", "B", Rect::new(0.0, 20.0, 100.0, 40.0));
        let mut hover = HoverResolver::new();
        hover.set_candidates(extract(&doc, body), &doc);

        hover.pointer_moved(Point::new(10.0, 10.0), &doc);
        // The shared edge y = 20 belongs to both; the earlier block wins.
        assert!(hover.pointer_moved(Point::new(10.0, 20.0), &doc).is_empty());
        assert_eq!(hover.target().map(|t| t.element), Some(a));

        let ev = hover.pointer_moved(Point::new(10.0, 30.0), &doc);
        assert_eq!(ev, vec![HoverEvent::Leave(a), HoverEvent::Enter(b)]);
        assert_eq!(hover.target().map(|t| t.top), Some(20.0));
    }

    #[test]
    fn boundary_point_is_inside() {
        let mut doc = Document::new();
        let body = doc.insert_element(None, "BODY");
        let a = block(&mut doc, body, "P", "A", Rect::new(0.0, 0.0, 100.0, 20.0));
        spacer(&mut doc, body);
        let mut hover = HoverResolver::new();
        hover.set_candidates(extract(&doc, body), &doc);
        hover.pointer_moved(Point::new(100.0, 20.0), &doc);
        assert_eq!(hover.target().map(|t| t.element), Some(a));
    }

    #[test]
    fn overlapping_candidates_resolve_to_earlier() {
        let mut doc = Document::new();
        let body = doc.insert_element(None, "BODY");
        let a = block(&mut doc, body, "P", "A", Rect::new(0.0, 0.0, 100.0, 100.0));
        let b = block(&mut doc, body, "P", "B", Rect::new(50.0, 50.0, 150.0, 150.0));
        let mut hover = HoverResolver::new();
        hover.set_candidates(extract(&doc, body), &doc);

        hover.pointer_moved(Point::new(75.0, 75.0), &doc);
        assert_eq!(hover.target().map(|t| t.element), Some(a));
        assert_eq!(hover.hits_at(Point::new(75.0, 75.0), &doc), vec![a, b]);

        // Reordering the list flips the winner.
        let ev = hover.set_candidates(CandidateList::from(vec![b, a]), &doc);
        assert_eq!(ev, vec![HoverEvent::Leave(a), HoverEvent::Enter(b)]);
    }

    #[test]
    fn empty_candidates_never_hover() {
        let doc = Document::new();
        let mut hover: HoverResolver<NodeId> = HoverResolver::new();
        for pt in [Point::ZERO, Point::new(10.0, 10.0), Point::new(-5.0, 1e6)] {
            assert!(hover.pointer_moved(pt, &doc).is_empty());
            assert!(hover.target().is_none());
        }
    }

    #[test]
    fn unmeasured_candidates_are_skipped() {
        let mut doc = Document::new();
        let body = doc.insert_element(None, "BODY");
        let a = doc.insert_element(Some(body), "P");
        doc.insert_text(Some(a), "No layout yet");
        let b = block(&mut doc, body, "P", "B", Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut hover = HoverResolver::new();
        hover.set_candidates(extract(&doc, body), &doc);
        assert_eq!(hover.candidates().len(), 2);

        hover.pointer_moved(Point::new(10.0, 10.0), &doc);
        assert_eq!(hover.target().map(|t| t.element), Some(b));
    }

    #[test]
    fn candidate_change_recomputes() {
        let mut doc = Document::new();
        let body = doc.insert_element(None, "BODY");
        let a = block(&mut doc, body, "P", "A", Rect::new(0.0, 0.0, 100.0, 100.0));
        spacer(&mut doc, body);
        let mut hover = HoverResolver::new();
        hover.pointer_moved(Point::new(10.0, 10.0), &doc);
        assert!(hover.target().is_none());

        let ev = hover.set_candidates(extract(&doc, body), &doc);
        assert_eq!(ev, vec![HoverEvent::Enter(a)]);

        let ev = hover.set_candidates(CandidateList::new(), &doc);
        assert_eq!(ev, vec![HoverEvent::Leave(a)]);
    }

    #[test]
    fn refresh_tracks_scrolling() {
        let mut doc = Document::new();
        let body = doc.insert_element(None, "BODY");
        let a = block(&mut doc, body, "P", "A", Rect::new(0.0, 0.0, 100.0, 100.0));
        spacer(&mut doc, body);
        let mut hover = HoverResolver::new();
        hover.set_candidates(extract(&doc, body), &doc);
        hover.pointer_moved(Point::new(10.0, 150.0), &doc);
        assert!(hover.target().is_none());

        doc.set_scroll_offset(Vec2::new(0.0, 100.0));
        assert_eq!(hover.refresh(&doc), vec![HoverEvent::Enter(a)]);
        assert_eq!(hover.target().map(|t| t.origin()), Some(Point::new(0.0, 100.0)));
    }

    #[test]
    fn first_line_comes_from_inner_text_block() {
        let mut doc = Document::new();
        let body = doc.insert_element(None, "BODY");
        let _h = block(&mut doc, body, "H1", "Title", Rect::new(0.0, 0.0, 100.0, 30.0));
        let div = doc.insert_element(Some(body), "DIV");
        let quote = doc.insert_element(Some(div), "BLOCKQUOTE");
        doc.insert_text(Some(quote), "Quoted text");
        doc.set_bounds(div, Some(Rect::new(0.0, 40.0, 100.0, 140.0)));
        doc.set_first_line_height(div, 100.0);
        doc.set_first_line_height(quote, 22.0);

        let mut hover = HoverResolver::new();
        hover.set_candidates(extract(&doc, body), &doc);
        hover.pointer_moved(Point::new(5.0, 60.0), &doc);
        let target = hover.target().copied().unwrap();
        assert_eq!(target.element, div);
        assert_eq!(target.height_of_first_line, 22.0);
    }

    #[test]
    fn lone_block_hovers_as_its_collapsed_wrapper() {
        let mut doc = Document::new();
        let body = doc.insert_element(None, "BODY");
        let p = block(&mut doc, body, "P", "Only", Rect::new(0.0, 0.0, 100.0, 20.0));
        doc.set_first_line_height(p, 17.0);
        let mut hover = HoverResolver::new();
        hover.set_candidates(extract(&doc, body), &doc);
        assert_eq!(hover.candidates().as_slice(), &[body]);

        // Only the paragraph is measured; the wrapper has no box yet.
        assert!(hover.pointer_moved(Point::new(10.0, 10.0), &doc).is_empty());

        doc.set_bounds(body, Some(Rect::new(0.0, 0.0, 200.0, 50.0)));
        assert_eq!(hover.refresh(&doc), vec![HoverEvent::Enter(body)]);
        let target = hover.target().copied().unwrap();
        assert_eq!(target.height_of_first_line, 17.0);
    }

    #[test]
    fn pointer_left_clears() {
        let mut doc = Document::new();
        let body = doc.insert_element(None, "BODY");
        let a = block(&mut doc, body, "P", "A", Rect::new(0.0, 0.0, 100.0, 100.0));
        spacer(&mut doc, body);
        let mut hover = HoverResolver::new();
        hover.set_candidates(extract(&doc, body), &doc);
        hover.pointer_moved(Point::new(1.0, 1.0), &doc);

        assert_eq!(hover.pointer_left(), vec![HoverEvent::Leave(a)]);
        assert_eq!(hover.pointer(), None);
        assert!(hover.pointer_left().is_empty());
        assert!(hover.refresh(&doc).is_empty(), "no pointer, no target");
    }

    #[test]
    fn attach_is_exactly_once() {
        let feed = PointerFeed::new();
        let mut hover: HoverResolver<NodeId> = HoverResolver::new();
        assert_eq!(hover.attach(&feed), Ok(()));
        assert_eq!(hover.attach(&feed), Err(AttachError::AlreadyAttached));
        assert_eq!(feed.listener_count(), 1, "second attach must not register");

        assert!(hover.detach());
        assert!(!hover.detach());
        assert_eq!(feed.listener_count(), 0);

        assert_eq!(hover.attach(&feed), Ok(()));
        drop(hover);
        assert_eq!(feed.listener_count(), 0, "teardown releases the listener");
    }

    #[test]
    fn poll_consumes_latest_published_point() {
        let mut doc = Document::new();
        let body = doc.insert_element(None, "BODY");
        let a = block(&mut doc, body, "P", "A", Rect::new(0.0, 0.0, 100.0, 100.0));
        let b = block(&mut doc, body, "P", "B", Rect::new(0.0, 200.0, 100.0, 300.0));

        let feed = PointerFeed::new();
        let mut hover = HoverResolver::new();
        hover.attach(&feed).unwrap();
        hover.set_candidates(extract(&doc, body), &doc);

        assert!(hover.poll(&doc).is_empty(), "nothing published yet");

        feed.publish(Point::new(10.0, 10.0));
        feed.publish(Point::new(10.0, 250.0));
        assert_eq!(hover.poll(&doc), vec![HoverEvent::Enter(b)]);
        assert!(hover.poll(&doc).is_empty(), "the stale point was dropped");

        feed.publish(Point::new(10.0, 10.0));
        assert_eq!(
            hover.poll(&doc),
            vec![HoverEvent::Leave(b), HoverEvent::Enter(a)]
        );
    }

    #[test]
    fn attach_error_message() {
        use alloc::string::ToString;
        assert_eq!(
            AttachError::AlreadyAttached.to_string(),
            "hover resolver is already attached to a pointer feed"
        );
    }
}
