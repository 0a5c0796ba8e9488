//! Environment signals: where override values and the process mode come from.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Flag, FlagOverrides, resolver::parse_override};

/// Environment variable selecting the process mode.
pub const MODE_ENV: &str = "LEASEHOLD_MODE";

// ---------------------------------------------------------------------------
// EnvSource
// ---------------------------------------------------------------------------

/// Something that can answer "what is environment variable X?".
///
/// The resolver reads through this trait instead of `std::env` so tests can
/// hand it a plain map and change it between resets without touching the
/// real process environment.
pub trait EnvSource {
    /// The value of `key`, or `None` if it's unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

impl FlagOverrides {
    /// The explicit override layer: one entry per `LEASEHOLD_FEATURE_*`
    /// variable that is set. Values go through [`parse_override`].
    pub fn from_env(env: &impl EnvSource) -> Self {
        Flag::ALL
            .into_iter()
            .filter_map(|flag| {
                env.var(flag.env_var())
                    .map(|raw| (flag, parse_override(&raw)))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// The process mode. Only development has a preset layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    #[default]
    Production,
}

impl Mode {
    /// Reads [`MODE_ENV`]. Exactly `"development"` selects
    /// [`Mode::Development`]; anything else, or unset, is production.
    pub fn from_env(env: &impl EnvSource) -> Self {
        match env.var(MODE_ENV).as_deref() {
            Some("development") => Self::Development,
            _ => Self::Production,
        }
    }

    /// The preset layer for this mode.
    ///
    /// Development turns the debug panel on and email off, so local runs
    /// never mail real applicants.
    pub fn preset(self) -> FlagOverrides {
        match self {
            Self::Development => FlagOverrides::new()
                .with(Flag::DebugPanel, true)
                .with(Flag::EmailNotifications, false),
            Self::Production => FlagOverrides::new(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}
