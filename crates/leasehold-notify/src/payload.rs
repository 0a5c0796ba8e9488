//! What gets sent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Who an email is for. Templates differ per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientRole {
    Admin,
    Applicant,
}

/// A structured email request: a template name plus the fields to fill in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPayload {
    pub recipient: RecipientRole,
    /// Destination address.
    pub to: String,
    /// Template name, resolved by the email service.
    pub template: String,
    /// Template fields.
    pub fields: BTreeMap<String, String>,
}

impl EmailPayload {
    /// A payload with no fields yet.
    pub fn new(recipient: RecipientRole, to: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            recipient,
            to: to.into(),
            template: template.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) a template field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Confirmation to an applicant that their application arrived.
    pub fn application_received(applicant_email: &str, applicant_name: &str, listing_title: &str) -> Self {
        Self::new(RecipientRole::Applicant, applicant_email, "application-received")
            .field("name", applicant_name)
            .field("listing", listing_title)
    }

    /// Heads-up to the admin that a new application needs review.
    pub fn new_application_alert(admin_email: &str, applicant_name: &str, listing_title: &str) -> Self {
        Self::new(RecipientRole::Admin, admin_email, "new-application")
            .field("applicant", applicant_name)
            .field("listing", listing_title)
    }
}
