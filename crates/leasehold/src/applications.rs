//! Notifications sent when a rental application comes in.

use leasehold_flags::{Flag, FlagSet};
use leasehold_notify::{Delivery, EmailPayload, Mailer, Notifier};

/// The facts about a new application that both emails need.
#[derive(Debug, Clone)]
pub struct ApplicationNotice {
    pub applicant_name: String,
    pub applicant_email: String,
    pub listing_title: String,
    /// Where admin alerts go.
    pub admin_email: String,
}

/// Emails the applicant a confirmation and the admin an alert.
///
/// Returns `None` without sending anything while `emailNotifications` is
/// off. Otherwise returns the delivery of `[confirmation, alert]`; failed
/// sends are already sitting in the notifier's outbox.
pub async fn announce_application<M: Mailer>(
    notifier: &Notifier<M>,
    flags: &FlagSet,
    notice: &ApplicationNotice,
) -> Option<[Delivery; 2]> {
    if !flags.get(Flag::EmailNotifications) {
        tracing::debug!(
            listing = %notice.listing_title,
            "email notifications disabled, application not announced"
        );
        return None;
    }

    let confirmation = notifier
        .notify(EmailPayload::application_received(
            &notice.applicant_email,
            &notice.applicant_name,
            &notice.listing_title,
        ))
        .await;
    let alert = notifier
        .notify(EmailPayload::new_application_alert(
            &notice.admin_email,
            &notice.applicant_name,
            &notice.listing_title,
        ))
        .await;

    Some([confirmation, alert])
}
