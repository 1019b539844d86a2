// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer feed with scoped subscriptions.
//!
//! ## Model
//!
//! A [`PointerFeed`] stands for the broadest pointer scope the host has (the
//! window, not a single element). The host calls [`PointerFeed::publish`] on every
//! pointer move. Each live [`Subscription`] holds a single latest-value slot:
//! publishing overwrites it, and [`Subscription::take`] drains it. There is no
//! queue, so a consumer that polls late sees only the newest position.
//!
//! Subscriptions unregister themselves when dropped. Everything here is
//! single-threaded (`Rc`-based); the feed and its subscriptions are not `Send`.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::Point;

#[derive(Debug, Default)]
struct Slot {
    latest: Cell<Option<Point>>,
}

#[derive(Debug, Default)]
struct FeedInner {
    slots: Vec<Rc<Slot>>,
}

/// Source of absolute pointer positions.
///
/// Cloning the feed yields another handle to the same set of subscriptions.
#[derive(Clone, Default)]
pub struct PointerFeed {
    inner: Rc<RefCell<FeedInner>>,
}

impl core::fmt::Debug for PointerFeed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointerFeed")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

impl PointerFeed {
    /// Create a feed with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new listener slot.
    ///
    /// Every call registers another listener; callers that must listen at most
    /// once should hold on to the returned guard (as
    /// [`HoverResolver::attach`](crate::HoverResolver::attach) does).
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self) -> Subscription {
        let slot = Rc::new(Slot::default());
        self.inner.borrow_mut().slots.push(Rc::clone(&slot));
        Subscription {
            feed: Rc::downgrade(&self.inner),
            slot,
        }
    }

    /// Deliver a pointer position to every live listener, replacing any
    /// position they have not consumed yet.
    pub fn publish(&self, pt: Point) {
        for slot in &self.inner.borrow().slots {
            if let Some(stale) = slot.latest.replace(Some(pt)) {
                tracing::trace!(?stale, latest = ?pt, "superseded unconsumed pointer position");
            }
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }
}

/// Registration guard for one [`PointerFeed`] listener.
///
/// Dropping the guard unregisters the listener. A guard whose feed has been
/// dropped stays valid and simply never receives positions again.
pub struct Subscription {
    feed: Weak<RefCell<FeedInner>>,
    slot: Rc<Slot>,
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("pending", &self.slot.latest.get())
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl Subscription {
    /// Take the most recent unconsumed position, if any.
    pub fn take(&self) -> Option<Point> {
        self.slot.latest.take()
    }

    /// Returns true while the feed this guard was issued by is alive.
    pub fn is_connected(&self) -> bool {
        self.feed.strong_count() > 0
    }

    /// Returns true if this guard was issued by `feed`.
    pub fn belongs_to(&self, feed: &PointerFeed) -> bool {
        Weak::ptr_eq(&self.feed, &Rc::downgrade(&feed.inner))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(feed) = self.feed.upgrade() {
            feed.borrow_mut()
                .slots
                .retain(|s| !Rc::ptr_eq(s, &self.slot));
        }
    }
}
