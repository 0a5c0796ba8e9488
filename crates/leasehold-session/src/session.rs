//! Session types: the admin's login record and its configuration.
//!
//! An [`AdminSession`] answers three questions:
//! - WHO logged in (`username`)
//! - AS WHAT (`role`, always [`AdminRole::Admin`] in this system)
//! - WHEN (`issued_at`, so we know when the session expires)

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for the admin session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// The key the session record lives under in the store.
    pub storage_key: String,

    /// How long (in seconds) a session stays valid after login.
    ///
    /// Default: 86 400 (24 hours). There is no refresh; once this elapses
    /// the admin must log in again.
    pub ttl_secs: u64,

    /// How often (in seconds) a page holding the admin view should recheck
    /// the session. See [`spawn_recheck`](crate::spawn_recheck).
    ///
    /// Default: 60 seconds.
    pub recheck_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: "leasehold:admin-session".to_string(),
            ttl_secs: 24 * 60 * 60,
            recheck_interval_secs: 60,
        }
    }
}

impl SessionConfig {
    /// The session lifetime as a chrono delta.
    pub fn ttl(&self) -> TimeDelta {
        i64::try_from(self.ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }

    /// The recheck period as a std duration.
    pub fn recheck_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.recheck_interval_secs)
    }
}

// ---------------------------------------------------------------------------
// AdminRole
// ---------------------------------------------------------------------------

/// The role recorded in a session. Leasehold only has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Admin,
}

// ---------------------------------------------------------------------------
// AdminSession
// ---------------------------------------------------------------------------

/// The persisted record asserting the admin authenticated at `issued_at`.
///
/// Stored as JSON:
///
/// ```text
/// { "username": "admin", "role": "admin", "loginTime": "2024-05-01T09:30:00Z" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    /// Who logged in. Never changes after the session is issued.
    pub username: String,

    /// Always [`AdminRole::Admin`].
    pub role: AdminRole,

    /// When the credential check succeeded.
    #[serde(rename = "loginTime")]
    pub issued_at: DateTime<Utc>,
}

impl AdminSession {
    /// Issues a new admin session at `now`.
    pub fn issue(username: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            username: username.into(),
            role: AdminRole::Admin,
            issued_at: now,
        }
    }

    /// How long ago the session was issued, as seen from `now`.
    pub fn age(&self, now: DateTime<Utc>) -> TimeDelta {
        now.signed_duration_since(self.issued_at)
    }

    /// `true` iff the session is younger than `ttl` at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        self.age(now) < ttl
    }
}

// ---------------------------------------------------------------------------
// AdminState
// ---------------------------------------------------------------------------

/// The two logical states of the admin login.
///
/// ```text
///   LoggedOut ──(authenticate ok)──→ LoggedIn
///       ↑                               │
///       └────(logout / expiry on read)──┘
/// ```
///
/// There is no in-memory copy of this state: it's rebuilt from storage on
/// every read, so a fresh process always starts out `LoggedOut` until a
/// valid record is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminState {
    LoggedOut,
    LoggedIn(AdminSession),
}

impl AdminState {
    /// Returns `true` for [`AdminState::LoggedIn`].
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }
}

impl From<Option<AdminSession>> for AdminState {
    fn from(session: Option<AdminSession>) -> Self {
        match session {
            Some(session) => Self::LoggedIn(session),
            None => Self::LoggedOut,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.storage_key, "leasehold:admin-session");
        assert_eq!(config.ttl(), TimeDelta::hours(24));
        assert_eq!(config.recheck_interval(), std::time::Duration::from_secs(60));
    }

    #[test]
    fn test_ttl_saturates_on_huge_values() {
        let config = SessionConfig {
            ttl_secs: u64::MAX,
            ..SessionConfig::default()
        };
        assert_eq!(config.ttl(), TimeDelta::MAX);
    }

    #[test]
    fn test_session_serializes_with_login_time_field() {
        let session = AdminSession::issue("admin", at("2024-05-01T09:30:00Z"));

        let json: serde_json::Value = serde_json::to_value(&session).unwrap();

        assert_eq!(json["username"], "admin");
        assert_eq!(json["role"], "admin");
        assert_eq!(json["loginTime"], "2024-05-01T09:30:00Z");
    }

    #[test]
    fn test_session_deserializes_millisecond_timestamps() {
        // Browser-style ISO strings carry milliseconds.
        let raw = r#"{"username":"admin","role":"admin","loginTime":"2024-05-01T09:30:00.123Z"}"#;

        let session: AdminSession = serde_json::from_str(raw).unwrap();

        assert_eq!(session.username, "admin");
        assert_eq!(session.role, AdminRole::Admin);
    }

    #[test]
    fn test_session_rejects_unknown_role() {
        let raw = r#"{"username":"admin","role":"tenant","loginTime":"2024-05-01T09:30:00Z"}"#;
        assert!(serde_json::from_str::<AdminSession>(raw).is_err());
    }

    #[test]
    fn test_is_valid_at_boundary() {
        let issued = at("2024-05-01T00:00:00Z");
        let session = AdminSession::issue("admin", issued);
        let ttl = TimeDelta::hours(24);

        assert!(session.is_valid_at(issued + TimeDelta::hours(24) - TimeDelta::seconds(1), ttl));
        assert!(!session.is_valid_at(issued + TimeDelta::hours(24), ttl));
    }

    #[test]
    fn test_admin_state_from_option() {
        assert_eq!(AdminState::from(None), AdminState::LoggedOut);

        let session = AdminSession::issue("admin", Utc::now());
        let state = AdminState::from(Some(session));
        assert!(state.is_logged_in());
    }
}
