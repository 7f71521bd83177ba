//! # Runtime configuration.
//!
//! Provides [`Config`] with the settings shared by the supervision runtime.
//!
//! Config is used in two ways:
//! 1. **Shutdown creation**: `Shutdown::from_config(logger, &config)`
//! 2. **Logging setup**: `logging::try_init(&config.log)`

use std::time::Duration;

/// Global configuration for the supervision runtime.
///
/// ## Field semantics
/// - `grace`: Maximum time between a shutdown request and the forced exit
/// - `log`: Filter and formatting of the global `tracing` subscriber
///
/// All fields are public; construct with `..Config::default()`.
#[derive(Clone, Debug)]
pub struct Config {
    /// Time the group gets to stop cooperatively once a shutdown was requested.
    ///
    /// When it elapses the process is terminated with exit code 1.
    pub grace: Duration,

    /// Logging subscriber settings.
    pub log: LogConfig,
}

impl Config {
    /// Returns the grace period; zero forces the exit right after shutdown starts.
    #[inline]
    pub fn grace(&self) -> Duration {
        self.grace
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `grace = 30s`
    /// - `log = LogConfig::default()`
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(30),
            log: LogConfig::default(),
        }
    }
}

/// Settings for [`logging::try_init`](crate::logging::try_init).
#[derive(Clone, Debug)]
pub struct LogConfig {
    /// Default `EnvFilter` directive, overridden by `RUST_LOG` when set.
    pub filter: String,
    /// Emit ANSI colors.
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            ansi: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.grace(), Duration::from_secs(30));
        assert_eq!(cfg.log.filter, "info");
        assert!(!cfg.log.ansi);
    }
}
