//! In-process listing feed.
//!
//! Every change bumps a version under the feed lock, and each subscriber
//! owns a [`Slot`] that remembers the last version it saw. Delivery to one
//! slot is serialized: whichever thread finds the slot idle becomes its
//! deliverer and keeps going until no newer snapshot is pending. A thread
//! that finds it busy leaves its snapshot as pending and returns. Older
//! snapshots are dropped, so a subscriber's last view is always the
//! newest one.

use std::collections::BTreeMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, Weak};
use std::thread::{self, ThreadId};

use crate::{Listing, ListingFeed, ListingId, SnapshotCallback, Subscription};

type Snapshot = Arc<Vec<Listing>>;

#[derive(Default)]
struct Inner {
    listings: Vec<Listing>,
    subscribers: BTreeMap<u64, Arc<Slot>>,
    next_id: u64,
    version: u64,
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

struct Slot {
    callback: SnapshotCallback,
    state: Mutex<SlotState>,
    idle: Condvar,
}

struct SlotState {
    active: bool,
    delivered: Option<u64>,
    pending: Option<(u64, Snapshot)>,
    deliverer: Option<ThreadId>,
}

impl Slot {
    fn new(callback: SnapshotCallback) -> Self {
        Self {
            callback,
            state: Mutex::new(SlotState {
                active: true,
                delivered: None,
                pending: None,
                deliverer: None,
            }),
            idle: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hands `snapshot` (taken at `version`) to the subscriber, unless it
    /// has already seen something newer.
    fn deliver(&self, version: u64, snapshot: Snapshot) {
        let mut state = self.lock();
        if !state.active
            || state.delivered.is_some_and(|seen| version <= seen)
            || state.pending.as_ref().is_some_and(|(queued, _)| version <= *queued)
        {
            return;
        }
        state.pending = Some((version, snapshot));
        if state.deliverer.is_some() {
            // The current deliverer (possibly this thread, one callback up
            // the stack) picks it up.
            return;
        }

        state.deliverer = Some(thread::current().id());
        while let Some((version, snapshot)) = state.pending.take() {
            if !state.active {
                break;
            }
            state.delivered = Some(version);
            drop(state);
            (self.callback)(&snapshot);
            state = self.lock();
        }
        state.deliverer = None;
        drop(state);
        self.idle.notify_all();
    }

    /// Stops delivery. Waits for a callback running on another thread to
    /// return; a callback unsubscribing itself doesn't wait.
    fn deactivate(&self) {
        let me = thread::current().id();
        let mut state = self.lock();
        state.active = false;
        state.pending = None;
        while state.deliverer.is_some_and(|t| t != me) {
            state = self
                .idle
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

// ---------------------------------------------------------------------------
// InMemoryListingFeed
// ---------------------------------------------------------------------------

/// A [`ListingFeed`] backed by a `Vec` in memory.
///
/// Clones share the same collection and subscriber list. Callbacks run on
/// a thread that made a change, after the feed lock is released, so a
/// callback may subscribe, unsubscribe or even write to the feed.
///
/// Ordering: each subscriber sees snapshots in change order, and the last
/// one it sees is the current collection. Under concurrent writes an
/// intermediate snapshot may be skipped. Once
/// [`Subscription::unsubscribe`] returns, the callback is not running on
/// any other thread and won't be called again. Don't unsubscribe while
/// holding a lock the callback takes.
#[derive(Clone, Default)]
pub struct InMemoryListingFeed {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryListingFeed {
    /// Creates an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a feed pre-filled with `listings`.
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        let feed = Self::new();
        feed.lock().listings = listings;
        feed
    }

    /// Inserts `listing`, or replaces the one with the same ID.
    pub fn upsert(&self, listing: Listing) {
        let mut inner = self.lock();
        match inner.listings.iter_mut().find(|l| l.id == listing.id) {
            Some(existing) => *existing = listing,
            None => inner.listings.push(listing),
        }
        self.notify(inner);
    }

    /// Removes the listing with `id`. Returns `false` (and notifies no one)
    /// if there was none.
    pub fn remove(&self, id: &ListingId) -> bool {
        let mut inner = self.lock();
        let before = inner.listings.len();
        inner.listings.retain(|l| &l.id != id);
        if inner.listings.len() == before {
            return false;
        }
        self.notify(inner);
        true
    }

    /// Replaces the whole collection.
    pub fn replace_all(&self, listings: Vec<Listing>) {
        let mut inner = self.lock();
        inner.listings = listings;
        self.notify(inner);
    }

    /// The current collection.
    pub fn snapshot(&self) -> Vec<Listing> {
        self.lock().listings.clone()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stamps the change, drops the lock, then delivers to everyone.
    fn notify(&self, mut inner: MutexGuard<'_, Inner>) {
        inner.version += 1;
        let version = inner.version;
        let snapshot: Snapshot = Arc::new(inner.listings.clone());
        let slots: Vec<Arc<Slot>> = inner.subscribers.values().cloned().collect();
        drop(inner);

        tracing::trace!(
            version,
            listings = snapshot.len(),
            subscribers = slots.len(),
            "pushing listing snapshot"
        );
        for slot in slots {
            slot.deliver(version, Arc::clone(&snapshot));
        }
    }
}

impl ListingFeed for InMemoryListingFeed {
    fn subscribe(&self, callback: SnapshotCallback) -> Subscription {
        let slot = Arc::new(Slot::new(callback));
        let (id, version, snapshot) = {
            let mut inner = self.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.insert(id, Arc::clone(&slot));
            (id, inner.version, Arc::new(inner.listings.clone()))
        };
        tracing::debug!(subscriber = id, "listing subscriber added");

        slot.deliver(version, snapshot);

        // Weak, so an outstanding Subscription doesn't keep the feed alive.
        let feed: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            slot.deactivate();
            if let Some(feed) = feed.upgrade() {
                feed.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .subscribers
                    .remove(&id);
                tracing::debug!(subscriber = id, "listing subscriber removed");
            }
        })
    }
}
