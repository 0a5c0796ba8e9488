//! The admin session manager: login, lazy expiry, logout.
//!
//! Every operation goes through the store. The manager keeps no copy of
//! the session in memory, so two managers over the same store (two tabs,
//! two processes on one `FileStore`) always agree on what was last written.
//!
//! # Failure policy
//!
//! The manager never returns storage errors. A failed read, a record that
//! doesn't parse, or a failed write all end in the same place: logged at
//! `warn` and treated as "logged out". For an admin gate, failing closed is
//! the only safe default.

use leasehold_store::SessionStore;

use crate::{
    AdminSession, AdminState, Clock, CredentialVerifier, SessionConfig,
    SessionError, SystemClock,
};

/// Owns the admin session record.
///
/// ## Lifecycle
///
/// ```text
/// authenticate() ──→ [LoggedIn] ──→ get_session() ──→ still valid? ──→ [LoggedIn]
///                         │                                 │
///                      logout()                        expired: remove
///                         │                                 │
///                         ▼                                 ▼
///                    [LoggedOut] ◀──────────────────────────┘
/// ```
///
/// Expiry is only ever noticed on read. There is no sweeper.
pub struct AdminSessionManager<S, V, C = SystemClock> {
    store: S,
    verifier: V,
    clock: C,
    config: SessionConfig,
}

impl<S, V> AdminSessionManager<S, V, SystemClock>
where
    S: SessionStore,
    V: CredentialVerifier,
{
    /// Creates a manager that reads the real system clock.
    pub fn new(store: S, verifier: V, config: SessionConfig) -> Self {
        Self::with_clock(store, verifier, SystemClock, config)
    }
}

impl<S, V, C> AdminSessionManager<S, V, C>
where
    S: SessionStore,
    V: CredentialVerifier,
    C: Clock,
{
    /// Creates a manager with an explicit clock.
    pub fn with_clock(store: S, verifier: V, clock: C, config: SessionConfig) -> Self {
        Self {
            store,
            verifier,
            clock,
            config,
        }
    }

    /// Checks the credential and, on success, persists a fresh session.
    ///
    /// A new session always overwrites whatever was stored before. On a
    /// mismatch nothing in the store is touched. Returns `false` if the
    /// credential is wrong OR the session could not be written; the caller
    /// can't tell these apart, and stays logged out either way.
    pub fn authenticate(&mut self, username: &str, password: &str) -> bool {
        if !self.verifier.verify(username, password) {
            tracing::info!("admin authentication rejected");
            return false;
        }

        let session = AdminSession::issue(username, self.clock.now());
        match self.persist(&session) {
            Ok(()) => {
                tracing::info!(username = %session.username, "admin session created");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not persist admin session");
                false
            }
        }
    }

    /// Returns the current session, or `None` if there is no valid one.
    ///
    /// Expired and unreadable records are removed as a side effect, so a
    /// second call returns `None` without doing the work again.
    pub fn get_session(&self) -> Option<AdminSession> {
        match self.load() {
            Ok(Some(session)) => {
                let now = self.clock.now();
                if session.is_valid_at(now, self.config.ttl()) {
                    return Some(session);
                }
                tracing::info!(
                    username = %session.username,
                    issued_at = %session.issued_at,
                    "admin session expired"
                );
                self.discard();
                None
            }
            Ok(None) => None,
            Err(SessionError::Corrupt(e)) => {
                tracing::warn!(error = %e, "discarding unreadable admin session");
                self.discard();
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "session store unavailable, treating as logged out");
                None
            }
        }
    }

    /// `true` iff [`get_session`](Self::get_session) returns a session.
    pub fn is_authenticated(&self) -> bool {
        self.get_session().is_some()
    }

    /// The current state, rehydrated from storage.
    pub fn state(&self) -> AdminState {
        self.get_session().into()
    }

    /// Removes the session record. Safe to call when already logged out.
    pub fn logout(&mut self) {
        self.discard();
        tracing::info!("admin logged out");
    }

    /// The configuration this manager was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&self) -> Result<Option<AdminSession>, SessionError> {
        let Some(raw) = self.store.get(&self.config.storage_key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn persist(&self, session: &AdminSession) -> Result<(), SessionError> {
        let raw = serde_json::to_string(session)?;
        self.store.set(&self.config.storage_key, &raw)?;
        Ok(())
    }

    fn discard(&self) {
        if let Err(e) = self.store.remove(&self.config.storage_key) {
            tracing::warn!(error = %e, "could not remove admin session record");
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
