//! Logging setup for droidtools
//!
//! Installs a `tracing` subscriber that writes to stderr, so a tool's
//! stdout stays reserved for its report. Verbosity flags map onto a level
//! filter which `RUST_LOG` overrides when set.

use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .with_target(config.show_target)
            .with_file(config.show_file)
            .with_line_number(config.show_line_number)
            .compact(),
    );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        level = %config.log_level,
        "Logging initialized"
    );

    Ok(())
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
    pub show_target: bool,
    pub show_file: bool,
    pub show_line_number: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            ansi: true,
            show_target: false,
            show_file: false,
            show_line_number: false,
        }
    }
}

impl TelemetryConfig {
    /// Build a configuration from `-v` count and `--quiet`
    ///
    /// `--quiet` wins over any number of `-v`.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        let log_level = if quiet {
            "error"
        } else {
            match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };

        Self {
            log_level: log_level.to_string(),
            show_target: verbose >= 3,
            show_file: verbose >= 3,
            show_line_number: verbose >= 3,
            ..Self::default()
        }
    }

    /// Disable ANSI escapes in log lines
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }
}

/// Timer for measuring operation duration
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    /// Stop the timer and log the duration
    pub fn stop(self) -> Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.name,
            duration_ms = duration.as_millis() as u64,
            "Timer completed"
        );
        duration
    }
}

/// Enter an info span and time it until the end of the enclosing scope
#[macro_export]
macro_rules! timed_span {
    ($name:expr) => {
        let _timer = $crate::Timer::start($name);
        let _span = tracing::info_span!($name).entered();
    };
    ($name:expr, $($field:tt)*) => {
        let _timer = $crate::Timer::start($name);
        let _span = tracing::info_span!($name, $($field)*).entered();
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(TelemetryConfig::from_verbosity(0, false).log_level, "warn");
        assert_eq!(TelemetryConfig::from_verbosity(1, false).log_level, "info");
        assert_eq!(TelemetryConfig::from_verbosity(2, false).log_level, "debug");
        assert_eq!(TelemetryConfig::from_verbosity(7, false).log_level, "trace");
    }

    #[test]
    fn test_quiet_wins() {
        let config = TelemetryConfig::from_verbosity(3, true);
        assert_eq!(config.log_level, "error");
    }

    #[test]
    fn test_without_ansi() {
        let config = TelemetryConfig::default().without_ansi();
        assert!(!config.ansi);
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start("test_operation");
        std::thread::sleep(Duration::from_millis(10));
        let duration = timer.stop();
        assert!(duration.as_millis() >= 10);
    }
}
