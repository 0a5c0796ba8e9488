//! Periodic session recheck.
//!
//! Expiry is lazy: nothing happens when a session crosses the TTL until
//! someone reads it. A page that stays open on the admin dashboard would
//! never notice. This task reads the session on a fixed period and calls
//! back once it finds the admin logged out, so the page can send them to
//! the login view.

use std::sync::Arc;
use std::time::Duration;

use leasehold_store::SessionStore;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::{AdminSessionManager, Clock, CredentialVerifier};

/// Spawns a task that checks the session every `period`.
///
/// The first check runs immediately. On the first check that finds no
/// valid session, `on_logged_out` is called and the task ends. Abort the
/// returned handle to stop it earlier (e.g. when the page unmounts).
///
/// A zero `period` is bumped to one millisecond.
pub fn spawn_recheck<S, V, C, F>(
    manager: Arc<Mutex<AdminSessionManager<S, V, C>>>,
    period: Duration,
    on_logged_out: F,
) -> JoinHandle<()>
where
    S: SessionStore,
    V: CredentialVerifier,
    C: Clock,
    F: FnOnce() + Send + 'static,
{
    let period = period.max(Duration::from_millis(1));

    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            let authenticated = manager.lock().await.is_authenticated();
            if !authenticated {
                tracing::debug!("session recheck found no admin session");
                on_logged_out();
                return;
            }
            tracing::trace!("session recheck ok");
        }
    })
}
