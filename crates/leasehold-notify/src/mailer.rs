//! The email service hook.

use crate::{EmailPayload, NotifyError};

/// Sends an email through whatever service the deployment uses.
///
/// # Example
///
/// ```rust
/// use leasehold_notify::{EmailPayload, Mailer, NotifyError};
///
/// /// Pretends the mail server is down.
/// struct Offline;
///
/// impl Mailer for Offline {
///     async fn send(&self, _payload: &EmailPayload) -> Result<(), NotifyError> {
///         Err(NotifyError::Unavailable("offline".into()))
///     }
/// }
/// ```
pub trait Mailer: Send + Sync + 'static {
    /// Sends `payload`.
    ///
    /// # Returns
    /// - `Ok(())` — the service accepted it
    /// - `Err(_)` — it didn't; the caller falls back
    fn send(
        &self,
        payload: &EmailPayload,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;
}

/// A [`Mailer`] that only logs. For development, where
/// `emailNotifications` is off and nobody should get real mail.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, payload: &EmailPayload) -> Result<(), NotifyError> {
        tracing::info!(
            to = %payload.to,
            recipient = ?payload.recipient,
            template = %payload.template,
            fields = payload.fields.len(),
            "email (log only)"
        );
        Ok(())
    }
}
