//! The subscription contract.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::Listing;

/// Called with the full listing snapshot, first on subscribe and then after
/// every change.
pub type SnapshotCallback = Arc<dyn Fn(&[Listing]) + Send + Sync>;

/// A collection of listings that pushes snapshots to subscribers.
///
/// # Contract
///
/// - `subscribe` invokes the callback with the current snapshot before it
///   returns, and again with the full snapshot after every change.
/// - The returned [`Subscription`] must be released exactly once. Taking
///   `self` in [`Subscription::unsubscribe`] makes a second release a
///   compile error; dropping an unreleased subscription releases it.
pub trait ListingFeed: Send + Sync + 'static {
    /// Registers `callback` and returns the handle that releases it.
    fn subscribe(&self, callback: SnapshotCallback) -> Subscription;

    /// Subscribes and forwards every snapshot into a channel.
    ///
    /// For async consumers that would rather `recv().await` than be called
    /// back. Snapshots sent after the receiver is dropped are discarded.
    fn subscribe_channel(&self) -> (Subscription, mpsc::UnboundedReceiver<Vec<Listing>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let subscription = self.subscribe(Arc::new(move |snapshot: &[Listing]| {
            let _ = tx.send(snapshot.to_vec());
        }));
        (subscription, rx)
    }
}

/// Handle to an active subscription. Releases it on
/// [`unsubscribe`](Self::unsubscribe) or drop, whichever comes first.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wraps the function that releases the subscription.
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Stops delivery to this subscriber.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_unsubscribe_releases_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sub = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sub.unsubscribe();

        // The drop that follows `unsubscribe` must not release again.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_releases() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        drop(Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
