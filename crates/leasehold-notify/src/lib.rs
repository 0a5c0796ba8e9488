//! Email notifications for Leasehold.
//!
//! Leasehold doesn't speak SMTP. It hands a structured [`EmailPayload`] to
//! a [`Mailer`] (your email service) and gets back success or failure.
//! A failure is never fatal: the [`Notifier`] parks the payload in a
//! fallback outbox so it can be retried or shown to the admin later.

mod error;
mod mailer;
mod notifier;
mod payload;

pub use error::NotifyError;
pub use mailer::{LogMailer, Mailer};
pub use notifier::{DEFAULT_OUTBOX_CAPACITY, Delivery, Notifier};
pub use payload::{EmailPayload, RecipientRole};
