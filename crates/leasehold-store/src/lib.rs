//! Storage adapters for Leasehold.
//!
//! Provides the [`SessionStore`] trait: a persistent key-value storage
//! holding opaque string records. The session layer keeps exactly one
//! record in it (the admin session), but the adapter itself knows nothing
//! about sessions.
//!
//! # Feature Flags
//!
//! - `file` (default) — [`FileStore`], a JSON file on disk

mod error;
#[cfg(feature = "file")]
mod file;
mod memory;

pub use error::StoreError;
#[cfg(feature = "file")]
pub use file::FileStore;
pub use memory::MemoryStore;

/// Persistent key-value storage for opaque string records.
///
/// Every method takes `&self`: implementations are shared storage (like a
/// browser's local storage shared by every tab), so they synchronize
/// internally. The last writer wins; there is no conflict detection.
pub trait SessionStore: Send + Sync + 'static {
    /// Returns the record stored under `key`, or `Ok(None)` if there is none.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous record.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the record under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
