//! The access gate: what pages ask before they render.
//!
//! Two independent questions, answered by two independent layers:
//!
//! - "Is this affordance turned on?" → [`FlagResolver`]
//! - "Is the admin logged in?"        → [`AdminSessionManager`]
//!
//! The gate only composes them. Neither layer knows about the other.

use leasehold_flags::{EnvSource, Flag, FlagResolver, FlagSet, ProcessEnv};
use leasehold_listings::Listing;
use leasehold_session::{AdminSessionManager, Clock, CredentialVerifier, SystemClock};
use leasehold_store::SessionStore;

/// The one message shown for any failed login.
///
/// Deliberately identical for "no such user" and "wrong password", so the
/// login form can't be used to discover the admin username.
pub const LOGIN_REJECTED_MESSAGE: &str = "Invalid username or password";

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// The site's views that the gate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Listings,
    StorageListings,
    Apply,
    AdminLogin,
    AdminDashboard,
}

impl Page {
    /// Every page.
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Listings,
        Page::StorageListings,
        Page::Apply,
        Page::AdminLogin,
        Page::AdminDashboard,
    ];

    /// The page's route.
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Listings => "/listings",
            Self::StorageListings => "/storage",
            Self::Apply => "/apply",
            Self::AdminLogin => "/admin/login",
            Self::AdminDashboard => "/admin",
        }
    }

    /// Looks a page up by route.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.path() == path)
    }

    /// `true` if only a logged-in admin may see the page.
    pub fn requires_admin(self) -> bool {
        matches!(self, Self::AdminDashboard)
    }

    /// The flag that must be on for the page to exist at all.
    pub fn required_flag(self) -> Option<Flag> {
        match self {
            Self::StorageListings => Some(Flag::StorageListings),
            Self::Apply => Some(Flag::ApplicationPortal),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Access / LoginOutcome
// ---------------------------------------------------------------------------

/// The gate's verdict for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Render it.
    Allowed,
    /// Protected page without a valid session. Redirect to
    /// [`Page::AdminLogin`] silently; an expired session gets no banner.
    RedirectToLogin,
    /// The page's flag is off.
    Disabled(Flag),
}

/// Result of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    /// Always carries [`LOGIN_REJECTED_MESSAGE`].
    Rejected { message: &'static str },
}

// ---------------------------------------------------------------------------
// AccessGate
// ---------------------------------------------------------------------------

/// Decides what a visitor may see.
pub struct AccessGate<S, V, C = SystemClock, E = ProcessEnv> {
    sessions: AdminSessionManager<S, V, C>,
    flags: FlagResolver<E>,
}

impl<S, V, C, E> AccessGate<S, V, C, E>
where
    S: SessionStore,
    V: CredentialVerifier,
    C: Clock,
    E: EnvSource,
{
    /// Builds a gate over an existing session manager and flag resolver.
    pub fn new(sessions: AdminSessionManager<S, V, C>, flags: FlagResolver<E>) -> Self {
        Self { sessions, flags }
    }

    /// The verdict for `page`.
    ///
    /// The flag is checked first: a disabled page is disabled for everyone,
    /// admin or not.
    pub fn check(&mut self, page: Page) -> Access {
        if let Some(flag) = page.required_flag() {
            if !self.flags.is_enabled(flag) {
                return Access::Disabled(flag);
            }
        }

        if page.requires_admin() && !self.sessions.is_authenticated() {
            tracing::debug!(page = page.path(), "no admin session, redirecting to login");
            return Access::RedirectToLogin;
        }

        Access::Allowed
    }

    /// Attempts an admin login.
    pub fn login(&mut self, username: &str, password: &str) -> LoginOutcome {
        if self.sessions.authenticate(username, password) {
            LoginOutcome::Success
        } else {
            LoginOutcome::Rejected {
                message: LOGIN_REJECTED_MESSAGE,
            }
        }
    }

    /// Logs the admin out.
    pub fn logout(&mut self) {
        self.sessions.logout();
    }

    /// The listings a public page should show: available units only, and
    /// no storage units while `storageListings` is off.
    pub fn visible_listings(&mut self, listings: &[Listing]) -> Vec<Listing> {
        let flags = self.flags.get_flags();
        filter_listings(&flags, listings)
    }

    /// The session manager.
    pub fn sessions(&self) -> &AdminSessionManager<S, V, C> {
        &self.sessions
    }

    /// The session manager, mutably.
    pub fn sessions_mut(&mut self) -> &mut AdminSessionManager<S, V, C> {
        &mut self.sessions
    }

    /// The flag resolver.
    pub fn flags_mut(&mut self) -> &mut FlagResolver<E> {
        &mut self.flags
    }
}

fn filter_listings(flags: &FlagSet, listings: &[Listing]) -> Vec<Listing> {
    let show_storage = flags.get(Flag::StorageListings);
    listings
        .iter()
        .filter(|l| l.available && (show_storage || !l.is_storage()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use leasehold_listings::{ListingId, ListingKind};

    use super::*;

    #[test]
    fn test_page_paths_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_path(page.path()), Some(page));
        }
        assert_eq!(Page::from_path("/nowhere"), None);
    }

    #[test]
    fn test_only_dashboard_requires_admin() {
        let protected: Vec<_> = Page::ALL.into_iter().filter(|p| p.requires_admin()).collect();
        assert_eq!(protected, vec![Page::AdminDashboard]);
    }

    #[test]
    fn test_filter_listings_hides_leased_and_storage_when_flag_off() {
        let unit = |id: &str, kind, available| Listing {
            id: ListingId::from(id),
            title: id.to_string(),
            kind,
            monthly_rent_cents: 1,
            available,
        };
        let listings = vec![
            unit("flat", ListingKind::Apartment, true),
            unit("leased", ListingKind::House, false),
            unit("locker", ListingKind::Storage, true),
        ];

        let mut flags = FlagSet::defaults();
        let shown: Vec<_> = filter_listings(&flags, &listings)
            .into_iter()
            .map(|l| l.id.0)
            .collect();
        assert_eq!(shown, ["flat", "locker"]);

        flags.set(Flag::StorageListings, false);
        let shown: Vec<_> = filter_listings(&flags, &listings)
            .into_iter()
            .map(|l| l.id.0)
            .collect();
        assert_eq!(shown, ["flat"]);
    }
}
