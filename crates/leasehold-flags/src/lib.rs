//! Feature flags for Leasehold.
//!
//! Every optional affordance on the site (the application portal, storage
//! listings, the debug panel...) is behind a [`Flag`]. A flag's value comes
//! from three layers, later ones winning key by key:
//!
//! ```text
//! compiled-in defaults  →  mode preset (development only)  →  LEASEHOLD_FEATURE_* vars
//! ```
//!
//! # Key types
//!
//! - [`Flag`] — the closed set of flags
//! - [`FlagSet`] — a value for every flag
//! - [`FlagOverrides`] — a partial layer (some flags set, the rest untouched)
//! - [`FlagResolver`] — merges the layers once and memoizes the result
//! - [`EnvSource`] — where environment signals come from

mod env;
mod error;
mod flag;
mod resolver;

pub use env::{EnvSource, MODE_ENV, Mode, ProcessEnv};
pub use error::FlagError;
pub use flag::{Flag, FlagOverrides, FlagSet};
pub use resolver::{FlagResolver, parse_override, resolve};
