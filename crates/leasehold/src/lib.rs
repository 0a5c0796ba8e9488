//! # Leasehold
//!
//! The admin session and feature-flag core behind the Leasehold rental
//! site, plus the contracts it uses to talk to the listing store and the
//! email service.
//!
//! Pages go through an [`AccessGate`]: it knows which pages need the admin
//! logged in and which ones sit behind a feature flag.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use leasehold::prelude::*;
//!
//! let credential = HashedCredential::from_env()?;
//! let sessions = AdminSessionManager::new(
//!     FileStore::new("leasehold-storage.json"),
//!     credential,
//!     SessionConfig::default(),
//! );
//! let mut gate = AccessGate::new(sessions, FlagResolver::from_process_env());
//!
//! match gate.check(Page::AdminDashboard) {
//!     Access::Allowed => { /* render */ }
//!     Access::RedirectToLogin => { /* send to /admin/login */ }
//!     Access::Disabled(flag) => println!("{flag} is off"),
//! }
//! # Ok::<(), LeaseholdError>(())
//! ```

mod applications;
mod error;
mod gate;
pub mod logging;

pub use applications::{ApplicationNotice, announce_application};
pub use error::LeaseholdError;
pub use gate::{Access, AccessGate, LOGIN_REJECTED_MESSAGE, LoginOutcome, Page};

pub mod prelude {
    pub use crate::logging::{LogFormat, LoggingConfig, init_logging};
    pub use crate::{
        Access, AccessGate, ApplicationNotice, LOGIN_REJECTED_MESSAGE, LeaseholdError,
        LoginOutcome, Page, announce_application,
    };
    pub use leasehold_flags::{Flag, FlagError, FlagOverrides, FlagResolver, FlagSet, Mode};
    pub use leasehold_listings::{
        InMemoryListingFeed, Listing, ListingFeed, ListingId, ListingKind, Subscription,
    };
    pub use leasehold_notify::{
        Delivery, EmailPayload, LogMailer, Mailer, Notifier, NotifyError, RecipientRole,
    };
    pub use leasehold_session::{
        AdminSession, AdminSessionManager, AdminState, Clock, CredentialVerifier,
        HashedCredential, ManualClock, SessionConfig, SessionError, SystemClock,
        spawn_recheck,
    };
    pub use leasehold_store::{FileStore, MemoryStore, SessionStore, StoreError};
}
