//! Tracing subscriber setup for the binaries.

use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Logging could not be initialised.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("failed to initialise tracing: {0}")]
    TracingInit(String),
}

/// Picks the default filter: `--verbose` and `--quiet` beat the config level.
#[must_use]
pub fn default_level<'a>(config: &'a LoggingConfig, verbose: bool, quiet: bool) -> &'a str {
    if verbose {
        "trace"
    } else if quiet {
        "error"
    } else {
        config.level.as_str()
    }
}

/// Installs the global subscriber, writing to stderr so stdout stays clean
/// for reports. `RUST_LOG` overrides the computed level.
///
/// # Errors
///
/// Returns [`LoggingError::TracingInit`] if a global subscriber already exists.
pub fn init_tracing(config: &LoggingConfig, verbose: bool, quiet: bool) -> Result<(), LoggingError> {
    let level = default_level(config, verbose, quiet);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if config.json {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init()
            .map_err(|e| LoggingError::TracingInit(e.to_string()))
    } else {
        fmt()
            .compact()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init()
            .map_err(|e| LoggingError::TracingInit(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_level() {
        let config = LoggingConfig {
            level: "warn".to_owned(),
            json: false,
        };
        assert_eq!(default_level(&config, false, false), "warn");
        assert_eq!(default_level(&config, true, false), "trace");
        assert_eq!(default_level(&config, false, true), "error");
    }

    #[test]
    fn second_init_fails() {
        let config = LoggingConfig::default();
        // The first call may lose a race with another test; the second cannot succeed.
        let _ = init_tracing(&config, false, true);
        assert!(matches!(
            init_tracing(&config, false, true),
            Err(LoggingError::TracingInit(_))
        ));
    }
}
