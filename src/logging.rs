//! Logging setup using tracing.
//!
//! Logs go to stderr so they never mix with report output on stdout.
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum level when `RUST_LOG` is unset.
    pub level: String,
    /// Include the module path of each event.
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: String::from("warn"),
            with_target: false,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Settings for the command line: `--verbose` forces debug level and
    /// shows module targets, otherwise the configured level applies.
    pub fn from_cli(verbose: bool, configured_level: &str) -> Self {
        if verbose {
            Self::new().level("debug").with_target()
        } else {
            Self::new().level(configured_level)
        }
    }

    pub fn with_target(mut self) -> Self {
        self.with_target = true;
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }
}

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn init(config: &LogConfig) {
    let fmt_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(config.with_target);

    let _ = tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::new().level("debug").with_target();
        assert_eq!(config.level, "debug");
        assert!(config.with_target);
    }

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.level, "warn");
        assert!(!config.with_target);
    }

    #[test]
    fn test_log_config_from_cli() {
        let verbose = LogConfig::from_cli(true, "error");
        assert_eq!(verbose.level, "debug");
        assert!(verbose.with_target);

        let quiet = LogConfig::from_cli(false, "error");
        assert_eq!(quiet.level, "error");
        assert!(!quiet.with_target);
    }

    #[test]
    fn test_init_twice() {
        init(&LogConfig::default());
        init(&LogConfig::new().level("debug"));
    }
}
