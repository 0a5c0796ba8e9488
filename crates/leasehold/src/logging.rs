//! Logging setup.
//!
//! Everything in Leasehold logs through `tracing`. Binaries call
//! [`init_logging`] once at startup; libraries never install a subscriber.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::LeaseholdError;

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human-friendly.
    Pretty,
    /// One line per event.
    #[default]
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset, e.g. `"info"` or
    /// `"leasehold_session=debug,info"`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// The filter to install: `RUST_LOG` if set and valid, else `level`.
    pub fn filter(&self) -> Result<EnvFilter, LeaseholdError> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| LeaseholdError::Logging(format!("bad filter {:?}: {e}", self.level)))
    }
}

/// Installs the global `tracing` subscriber.
///
/// # Errors
/// Returns [`LeaseholdError::Logging`] if the filter doesn't parse or a
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LeaseholdError> {
    let registry = tracing_subscriber::registry().with(config.filter()?);

    let result = match config.format {
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    };

    result.map_err(|e| LeaseholdError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn test_second_init_fails() {
        // Whichever call comes first may win; the second one can't.
        let config = LoggingConfig::default();
        let _ = init_logging(&config);

        assert!(matches!(init_logging(&config), Err(LeaseholdError::Logging(_))));
    }
}
