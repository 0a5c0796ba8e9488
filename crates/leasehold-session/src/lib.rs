//! Admin session management for Leasehold.
//!
//! This crate handles the lifecycle of the admin's login:
//!
//! 1. **Credential check** — is this the admin? ([`CredentialVerifier`] trait,
//!    [`HashedCredential`])
//! 2. **Session record** — a persisted [`AdminSession`] stamped with its
//!    issue time, kept in a [`SessionStore`](leasehold_store::SessionStore)
//! 3. **Lazy expiry** — sessions older than the configured TTL (24h by
//!    default) are treated as absent and removed when they are read
//!
//! # How it fits in the stack
//!
//! ```text
//! Access gate / pages (above)  ← ask "is the admin logged in?"
//!     ↕
//! Session Layer (this crate)   ← owns the session record and its expiry
//!     ↕
//! Store Layer (below)          ← persists one opaque string record
//! ```
//!
//! The store is treated as a cache of "the admin authenticated at time T".
//! Nothing here signs the record; a deployment that needs a real trust
//! boundary must verify a server-issued credential on every request.

mod auth;
mod clock;
mod error;
mod manager;
mod recheck;
mod session;

pub use auth::{CredentialVerifier, HashedCredential};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::SessionError;
pub use manager::AdminSessionManager;
pub use recheck::spawn_recheck;
pub use session::{AdminRole, AdminSession, AdminState, SessionConfig};
