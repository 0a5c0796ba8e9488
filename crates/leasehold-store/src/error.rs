use std::path::PathBuf;

/// Errors that can occur in the storage layer.
///
/// Callers above this layer (the session manager) never surface these to
/// users. They log them and fall back to "no record".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing storage cannot be used at all right now.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed.
    #[error("storage i/o failed on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but does not hold a key/value map.
    #[cfg(feature = "file")]
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}
