//! Error types for email dispatch.

/// Errors a [`Mailer`](crate::Mailer) can report.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The email service refused this message (bad address, template...).
    #[error("email rejected: {0}")]
    Rejected(String),

    /// The email service couldn't be reached.
    #[error("email service unavailable: {0}")]
    Unavailable(String),
}
