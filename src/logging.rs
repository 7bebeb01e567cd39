//! Logging initialization for the composer engine.
//!
//! Logs go to stderr by default; with `logging.to_file` set they go to a
//! per-run file under `<session dir>/logs/` instead.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Result of logging initialization
pub struct LoggingHandle {
    /// Guard that must be kept alive for the duration of the program.
    /// When dropped, ensures all buffered logs are flushed.
    pub _guard: Option<WorkerGuard>,

    /// Path to the log file (only set with file logging enabled)
    pub log_file_path: Option<PathBuf>,
}

/// Level from config unless the debug flag overrides it
fn base_level(config: &Config, debug_override: bool) -> &str {
    if debug_override {
        "debug"
    } else {
        &config.logging.level
    }
}

/// Effective filter: `RUST_LOG` wins, then `debug_override`, then config
fn resolve_filter(config: &Config, debug_override: bool) -> EnvFilter {
    EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| base_level(config, debug_override).to_string()),
    )
}

/// File name for this run's log, stamped so concurrent runs never collide
fn log_file_name() -> String {
    format!("composer-{}.log", chrono::Utc::now().format("%Y%m%dT%H%M%SZ"))
}

/// Initialize logging from the configuration.
pub fn init_logging(config: &Config, debug_override: bool) -> Result<LoggingHandle> {
    let filter = resolve_filter(config, debug_override);
    let fmt = tracing_subscriber::fmt::layer().with_target(false);

    if !config.logging.to_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt.with_writer(std::io::stderr))
            .init();
        return Ok(LoggingHandle {
            _guard: None,
            log_file_path: None,
        });
    }

    let logs_dir = config.logs_path();
    std::fs::create_dir_all(&logs_dir).context("Failed to create logs directory")?;

    let file_name = log_file_name();
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&logs_dir, &file_name));

    tracing_subscriber::registry()
        .with(filter)
        // No ANSI codes in log files
        .with(fmt.with_ansi(false).with_writer(writer))
        .init();

    Ok(LoggingHandle {
        _guard: Some(guard),
        log_file_path: Some(logs_dir.join(file_name)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name_is_stamped() {
        let name = log_file_name();
        assert!(name.starts_with("composer-"));
        assert!(name.ends_with("Z.log"));
    }

    #[test]
    fn test_base_level_prefers_debug_override() {
        let config = Config::default();
        assert_eq!(base_level(&config, false), "info");
        assert_eq!(base_level(&config, true), "debug");
    }

    #[test]
    fn test_logs_path_under_session_dir() {
        let mut config = Config::default();
        config.session.dir = "/tmp/composer-logging-test".to_string();
        assert_eq!(
            config.logs_path(),
            PathBuf::from("/tmp/composer-logging-test/logs")
        );
    }
}
