//! Unified error type for Leasehold.

use leasehold_flags::FlagError;
use leasehold_notify::NotifyError;
use leasehold_session::SessionError;
use leasehold_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates the `From` impl, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum LeaseholdError {
    /// A storage-level error (unavailable, i/o, corrupt file).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A session-level error (credential setup).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A flag lookup error (unknown flag name).
    #[error(transparent)]
    Flag(#[from] FlagError),

    /// An email dispatch error.
    #[error(transparent)]
    Notify(#[from] NotifyError),

    /// The logging subsystem could not be initialised.
    #[error("logging setup failed: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store_error() {
        let err = StoreError::Unavailable("gone".into());
        let leasehold_err: LeaseholdError = err.into();
        assert!(matches!(leasehold_err, LeaseholdError::Store(_)));
        assert!(leasehold_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::MissingEnv("LEASEHOLD_ADMIN_USERNAME");
        let leasehold_err: LeaseholdError = err.into();
        assert!(matches!(leasehold_err, LeaseholdError::Session(_)));
    }

    #[test]
    fn test_from_flag_error() {
        let err = FlagError::UnknownFlag("nope".into());
        let leasehold_err: LeaseholdError = err.into();
        assert!(matches!(leasehold_err, LeaseholdError::Flag(_)));
        assert!(leasehold_err.to_string().contains("nope"));
    }

    #[test]
    fn test_from_notify_error() {
        let err = NotifyError::Rejected("bad address".into());
        let leasehold_err: LeaseholdError = err.into();
        assert!(matches!(leasehold_err, LeaseholdError::Notify(_)));
    }
}
