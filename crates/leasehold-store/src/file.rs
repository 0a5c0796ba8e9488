//! File-backed storage.
//!
//! The whole store is one JSON object mapping keys to string values.
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash mid-write leaves either the old file or the new one, never half of
//! each. A file that doesn't parse is reported by reads, and the next
//! write replaces it.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{SessionStore, StoreError};

type Records = BTreeMap<String, String>;

/// A [`SessionStore`] persisted to a JSON file.
///
/// The file is created on first write. A missing file reads as an empty
/// store. Access from this process is serialized by an internal lock;
/// other processes writing the same file race with last-writer-wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Opens (without creating) a store at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_records(&self) -> Result<Records, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(Records::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(StoreError::Corrupt),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Records::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Reads the records a write starts from. A corrupt file reads as
    /// empty, flagged so the caller rewrites it even if nothing changed.
    fn read_records_for_write(&self) -> Result<(Records, bool), StoreError> {
        match self.read_records() {
            Ok(records) => Ok((records, false)),
            Err(StoreError::Corrupt(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "store file is corrupt, overwriting"
                );
                Ok((Records::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_records(&self, records: &Records) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let bytes = serde_json::to_vec_pretty(records).map_err(StoreError::Corrupt)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, bytes).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::trace!(path = %self.path.display(), records = records.len(), "store flushed");
        Ok(())
    }

    fn locked<T>(
        &self,
        f: impl FnOnce() -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoreError::Unavailable("file store lock poisoned".into()))?;
        f()
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.locked(|| Ok(self.read_records()?.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.locked(|| {
            let (mut records, _) = self.read_records_for_write()?;
            records.insert(key.to_string(), value.to_string());
            self.write_records(&records)
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.locked(|| {
            let (mut records, corrupt) = self.read_records_for_write()?;
            if records.remove(key).is_some() || corrupt {
                self.write_records(&records)?;
            }
            Ok(())
        })
    }
}
