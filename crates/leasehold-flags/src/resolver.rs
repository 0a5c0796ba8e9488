//! The memoizing flag resolver.

use std::sync::Arc;

use crate::{EnvSource, Flag, FlagError, FlagOverrides, FlagSet, Mode, ProcessEnv};

/// Parses an explicit override value.
///
/// Only the exact string `"true"` is true. Everything else, including
/// `"TRUE"`, `"1"` and `""`, is false. Never fails.
pub fn parse_override(raw: &str) -> bool {
    raw == "true"
}

/// Applies `preset` then `explicit` on top of `defaults`.
pub fn resolve(defaults: &FlagSet, preset: &FlagOverrides, explicit: &FlagOverrides) -> FlagSet {
    defaults.merged(preset).merged(explicit)
}

/// Resolves flags from their layers once and hands out the result.
///
/// The resolver is a plain owned value: whoever builds the app owns one and
/// passes it (or the `Arc<FlagSet>` it returns) to whatever needs flags.
///
/// ## Memo lifecycle
///
/// ```text
/// (empty) ──get_flags()──→ (computed) ──reset()──→ (empty)
///                               │
///                        override_flags()
///                               ▼
///                      (computed ⊕ partial)
/// ```
///
/// The memo is never invalidated implicitly. Changing the environment has
/// no effect until [`reset`](Self::reset).
#[derive(Debug)]
pub struct FlagResolver<E = ProcessEnv> {
    env: E,
    defaults: FlagSet,
    memo: Option<Arc<FlagSet>>,
}

impl FlagResolver<ProcessEnv> {
    /// A resolver over the real process environment.
    pub fn from_process_env() -> Self {
        Self::new(ProcessEnv)
    }
}

impl<E: EnvSource> FlagResolver<E> {
    /// A resolver over `env` with the compiled-in defaults.
    pub fn new(env: E) -> Self {
        Self {
            env,
            defaults: FlagSet::defaults(),
            memo: None,
        }
    }

    /// Replaces the bottom layer. Clears the memo.
    pub fn with_defaults(mut self, defaults: FlagSet) -> Self {
        self.defaults = defaults;
        self.memo = None;
        self
    }

    /// The resolved flags, computing them on first use.
    ///
    /// Calls between resets return the same `Arc`.
    pub fn get_flags(&mut self) -> Arc<FlagSet> {
        if let Some(flags) = &self.memo {
            return Arc::clone(flags);
        }

        let flags = Arc::new(self.compute());
        self.memo = Some(Arc::clone(&flags));
        flags
    }

    /// Whether `flag` is on.
    pub fn is_enabled(&mut self, flag: Flag) -> bool {
        self.get_flags().get(flag)
    }

    /// Whether the flag called `name` is on.
    ///
    /// # Errors
    /// Returns [`FlagError::UnknownFlag`] if no flag has that name.
    pub fn is_enabled_by_name(&mut self, name: &str) -> Result<bool, FlagError> {
        let flag: Flag = name.parse()?;
        Ok(self.is_enabled(flag))
    }

    /// Forgets the memo. The next [`get_flags`](Self::get_flags) rereads
    /// the environment.
    pub fn reset(&mut self) {
        self.memo = None;
        tracing::debug!("feature flags reset");
    }

    /// Forces the memo to the current flags with `partial` applied,
    /// skipping the layer computation. For test harnesses.
    pub fn override_flags(&mut self, partial: &FlagOverrides) {
        let current = *self.get_flags();
        self.memo = Some(Arc::new(current.merged(partial)));
        tracing::debug!(?partial, "feature flags overridden");
    }

    /// The mode the environment currently selects.
    pub fn mode(&self) -> Mode {
        Mode::from_env(&self.env)
    }

    /// The environment source.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Mutable access to the environment source. Changes take effect after
    /// [`reset`](Self::reset).
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    fn compute(&self) -> FlagSet {
        let mode = self.mode();
        let explicit = FlagOverrides::from_env(&self.env);
        let flags = resolve(&self.defaults, &mode.preset(), &explicit);

        tracing::debug!(
            %mode,
            explicit = explicit.iter().count(),
            enabled = ?flags.enabled().collect::<Vec<_>>(),
            "feature flags resolved"
        );
        flags
    }
}
