//! The flag enumeration and the two shapes flag values come in.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::FlagError;

// ---------------------------------------------------------------------------
// Flag
// ---------------------------------------------------------------------------

/// Every feature flag the site knows about.
///
/// The set is closed: adding a flag means adding a variant here, giving it
/// a default in [`FlagSet::defaults`], and listing it in [`Flag::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flag {
    /// Online rental applications.
    ApplicationPortal,
    /// Storage units on the public listings page.
    StorageListings,
    /// Live listing updates via the document-store subscription.
    RealtimeListings,
    /// Email notifications to admins and applicants.
    EmailNotifications,
    /// The dashboard's periodic notification poll.
    AdminNotificationPoll,
    /// Site-wide maintenance banner.
    MaintenanceBanner,
    /// Developer debug panel.
    DebugPanel,
}

impl Flag {
    /// Number of flags.
    pub const COUNT: usize = 7;

    /// All flags, in declaration order.
    pub const ALL: [Flag; Self::COUNT] = [
        Flag::ApplicationPortal,
        Flag::StorageListings,
        Flag::RealtimeListings,
        Flag::EmailNotifications,
        Flag::AdminNotificationPoll,
        Flag::MaintenanceBanner,
        Flag::DebugPanel,
    ];

    /// The flag's public name, as used in UIs and JSON.
    pub fn name(self) -> &'static str {
        match self {
            Self::ApplicationPortal => "applicationPortal",
            Self::StorageListings => "storageListings",
            Self::RealtimeListings => "realtimeListings",
            Self::EmailNotifications => "emailNotifications",
            Self::AdminNotificationPoll => "adminNotificationPoll",
            Self::MaintenanceBanner => "maintenanceBanner",
            Self::DebugPanel => "debugPanel",
        }
    }

    /// The environment variable that overrides this flag.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::ApplicationPortal => "LEASEHOLD_FEATURE_APPLICATION_PORTAL",
            Self::StorageListings => "LEASEHOLD_FEATURE_STORAGE_LISTINGS",
            Self::RealtimeListings => "LEASEHOLD_FEATURE_REALTIME_LISTINGS",
            Self::EmailNotifications => "LEASEHOLD_FEATURE_EMAIL_NOTIFICATIONS",
            Self::AdminNotificationPoll => "LEASEHOLD_FEATURE_ADMIN_NOTIFICATION_POLL",
            Self::MaintenanceBanner => "LEASEHOLD_FEATURE_MAINTENANCE_BANNER",
            Self::DebugPanel => "LEASEHOLD_FEATURE_DEBUG_PANEL",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Flag {
    type Err = FlagError;

    /// Parses a public flag name. Names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.name() == s)
            .ok_or_else(|| FlagError::UnknownFlag(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// FlagSet
// ---------------------------------------------------------------------------

/// A resolved value for every flag.
///
/// Array-backed and indexed by [`Flag`], so there is no way to build one
/// with a flag missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSet([bool; Flag::COUNT]);

impl FlagSet {
    /// The compiled-in defaults: the production site as it normally runs.
    pub fn defaults() -> Self {
        let mut set = Self([false; Flag::COUNT]);
        set.set(Flag::ApplicationPortal, true);
        set.set(Flag::StorageListings, true);
        set.set(Flag::RealtimeListings, true);
        set.set(Flag::EmailNotifications, true);
        set.set(Flag::AdminNotificationPoll, true);
        set.set(Flag::MaintenanceBanner, false);
        set.set(Flag::DebugPanel, false);
        set
    }

    /// A set with every flag at `value`.
    pub fn all(value: bool) -> Self {
        Self([value; Flag::COUNT])
    }

    /// The value of `flag`.
    pub fn get(&self, flag: Flag) -> bool {
        self.0[flag.index()]
    }

    /// Sets `flag` to `value`.
    pub fn set(&mut self, flag: Flag, value: bool) {
        self.0[flag.index()] = value;
    }

    /// Returns a copy with `layer` applied on top. Flags the layer doesn't
    /// mention keep their value here.
    pub fn merged(mut self, layer: &FlagOverrides) -> Self {
        for (flag, value) in layer.iter() {
            self.set(flag, value);
        }
        self
    }

    /// Every flag with its value, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Flag, bool)> + '_ {
        Flag::ALL.into_iter().map(|flag| (flag, self.get(flag)))
    }

    /// The flags that are on.
    pub fn enabled(&self) -> impl Iterator<Item = Flag> + '_ {
        self.iter().filter_map(|(flag, on)| on.then_some(flag))
    }
}

impl Default for FlagSet {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Serializes as `{ "applicationPortal": true, ... }`.
impl Serialize for FlagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Flag::COUNT))?;
        for (flag, value) in self.iter() {
            map.serialize_entry(flag.name(), &value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// FlagOverrides
// ---------------------------------------------------------------------------

/// A partial layer of flag values.
///
/// A layer only ever sets flags; it can't "unset" one back to undefined.
/// Unmentioned flags fall through to whatever was below.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagOverrides([Option<bool>; Flag::COUNT]);

impl FlagOverrides {
    /// An empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, flag: Flag, value: bool) -> Self {
        self.set(flag, value);
        self
    }

    /// Sets `flag` in this layer.
    pub fn set(&mut self, flag: Flag, value: bool) {
        self.0[flag.index()] = Some(value);
    }

    /// The value this layer gives `flag`, if any.
    pub fn get(&self, flag: Flag) -> Option<bool> {
        self.0[flag.index()]
    }

    /// `true` if the layer sets nothing.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// The flags this layer sets, with their values.
    pub fn iter(&self) -> impl Iterator<Item = (Flag, bool)> + '_ {
        Flag::ALL
            .into_iter()
            .filter_map(|flag| self.get(flag).map(|value| (flag, value)))
    }
}

impl FromIterator<(Flag, bool)> for FlagOverrides {
    fn from_iter<I: IntoIterator<Item = (Flag, bool)>>(iter: I) -> Self {
        let mut layer = Self::new();
        for (flag, value) in iter {
            layer.set(flag, value);
        }
        layer
    }
}
