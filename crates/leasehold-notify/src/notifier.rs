//! Dispatch with a fallback outbox.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::{EmailPayload, Mailer};

/// Outbox size used by [`Notifier::new`].
pub const DEFAULT_OUTBOX_CAPACITY: usize = 256;

/// What happened to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The mailer accepted it.
    Sent,
    /// The mailer failed; the payload is in the outbox.
    Queued,
}

/// Sends notifications through a [`Mailer`], queueing the ones that fail.
///
/// The fallback is deterministic: every failed payload lands in the
/// outbox, in order, and stays there until [`drain_outbox`](Self::drain_outbox).
/// No retries happen here.
///
/// The outbox is bounded. Once it holds `capacity` payloads, each new
/// failure evicts the oldest one (logged at `warn`). Drain it periodically.
pub struct Notifier<M> {
    mailer: M,
    outbox: Mutex<VecDeque<EmailPayload>>,
    capacity: usize,
}

impl<M: Mailer> Notifier<M> {
    /// Creates a notifier holding up to [`DEFAULT_OUTBOX_CAPACITY`]
    /// failed payloads.
    pub fn new(mailer: M) -> Self {
        Self::with_capacity(mailer, DEFAULT_OUTBOX_CAPACITY)
    }

    /// Creates a notifier whose outbox holds at most `capacity` payloads
    /// (at least one).
    pub fn with_capacity(mailer: M, capacity: usize) -> Self {
        Self {
            mailer,
            outbox: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Sends `payload`, or queues it if the mailer fails.
    pub async fn notify(&self, payload: EmailPayload) -> Delivery {
        match self.mailer.send(&payload).await {
            Ok(()) => {
                tracing::debug!(template = %payload.template, "notification sent");
                Delivery::Sent
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    template = %payload.template,
                    "notification failed, queued in outbox"
                );
                let mut outbox = self.outbox.lock().unwrap_or_else(PoisonError::into_inner);
                if outbox.len() >= self.capacity {
                    if let Some(evicted) = outbox.pop_front() {
                        tracing::warn!(
                            template = %evicted.template,
                            to = %evicted.to,
                            capacity = self.capacity,
                            "outbox full, dropping oldest notification"
                        );
                    }
                }
                outbox.push_back(payload);
                Delivery::Queued
            }
        }
    }

    /// Number of queued payloads.
    pub fn outbox_len(&self) -> usize {
        self.outbox.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Takes every queued payload, oldest first, leaving the outbox empty.
    pub fn drain_outbox(&self) -> Vec<EmailPayload> {
        std::mem::take(&mut *self.outbox.lock().unwrap_or_else(PoisonError::into_inner)).into()
    }

    /// The wrapped mailer.
    pub fn mailer(&self) -> &M {
        &self.mailer
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::{LogMailer, NotifyError};

    /// Fails while `down` is set.
    #[derive(Default)]
    struct FlakyMailer {
        down: AtomicBool,
    }

    impl Mailer for FlakyMailer {
        async fn send(&self, _payload: &EmailPayload) -> Result<(), NotifyError> {
            if self.down.load(Ordering::SeqCst) {
                Err(NotifyError::Unavailable("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    fn payload(name: &str) -> EmailPayload {
        EmailPayload::application_received("a@example.com", name, "Loft 3")
    }

    #[tokio::test]
    async fn test_notify_success_returns_sent() {
        let notifier = Notifier::new(LogMailer);

        assert_eq!(notifier.notify(payload("Jo")).await, Delivery::Sent);
        assert_eq!(notifier.outbox_len(), 0);
    }

    #[tokio::test]
    async fn test_notify_failure_queues_payload() {
        let notifier = Notifier::new(FlakyMailer::default());
        notifier.mailer().down.store(true, Ordering::SeqCst);

        assert_eq!(notifier.notify(payload("Jo")).await, Delivery::Queued);
        assert_eq!(notifier.outbox_len(), 1);
    }

    #[tokio::test]
    async fn test_drain_outbox_returns_failures_in_order() {
        let notifier = Notifier::new(FlakyMailer::default());
        notifier.mailer().down.store(true, Ordering::SeqCst);
        notifier.notify(payload("first")).await;
        notifier.notify(payload("second")).await;

        notifier.mailer().down.store(false, Ordering::SeqCst);
        notifier.notify(payload("third")).await;

        let queued = notifier.drain_outbox();
        let names: Vec<_> = queued.iter().map(|p| p.fields["name"].as_str()).collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(notifier.outbox_len(), 0);
    }

    #[tokio::test]
    async fn test_notify_full_outbox_drops_oldest() {
        let notifier = Notifier::with_capacity(FlakyMailer::default(), 2);
        notifier.mailer().down.store(true, Ordering::SeqCst);

        for name in ["first", "second", "third"] {
            assert_eq!(notifier.notify(payload(name)).await, Delivery::Queued);
        }

        let names: Vec<_> = notifier
            .drain_outbox()
            .iter()
            .map(|p| p.fields["name"].clone())
            .collect();
        assert_eq!(names, ["second", "third"]);
    }

    #[tokio::test]
    async fn test_with_capacity_zero_still_keeps_latest() {
        let notifier = Notifier::with_capacity(FlakyMailer::default(), 0);
        notifier.mailer().down.store(true, Ordering::SeqCst);

        notifier.notify(payload("first")).await;
        notifier.notify(payload("second")).await;

        assert_eq!(notifier.outbox_len(), 1);
        assert_eq!(notifier.drain_outbox()[0].fields["name"], "second");
    }
}
