//! Error types for the flag layer.

/// Errors that can occur while looking up flags.
#[derive(Debug, thiserror::Error)]
pub enum FlagError {
    /// A flag was looked up by a name outside the enumerated set.
    ///
    /// This is a programming error (a typo, or a flag that was renamed or
    /// removed), so it's reported instead of quietly reading as `false`.
    #[error("unknown feature flag: {0:?}")]
    UnknownFlag(String),
}
