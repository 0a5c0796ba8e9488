//! Error types for the session layer.

use leasehold_store::StoreError;

/// Errors that can occur while managing the admin session.
///
/// Only credential setup errors ever reach a caller. Storage and parse
/// failures are caught inside
/// [`AdminSessionManager`](crate::AdminSessionManager), logged, and turned
/// into "logged out".
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// An encoded credential could not be parsed.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// A required environment variable is not set.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// The session store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The stored record is not a valid session.
    #[error("stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
