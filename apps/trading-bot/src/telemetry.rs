//! Logging Setup
//!
//! Installs a `tracing` subscriber with:
//!
//! - an `EnvFilter` (`RUST_LOG` wins over the configured level)
//! - a console layer on stderr, pretty or JSON
//! - an optional non-blocking file layer writing `<directory>/trading_bot.log`
//!
//! Stdout is left to command output.
//!
//! # Usage
//!
//! ```rust,ignore
//! use trading_bot::telemetry::init_logging;
//!
//! let _guard = init_logging(&config.observability.logging)?;
//! // ... application code; dropping the guard flushes the file sink
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Log file name prefix; the file is `trading_bot.log`.
const LOG_FILE_PREFIX: &str = "trading_bot";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Errors while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured level is not a valid filter directive.
    #[error("Invalid log filter '{directive}': {source}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// Parser error.
        source: tracing_subscriber::filter::ParseError,
    },

    /// The log directory could not be created.
    #[error("Failed to create log directory '{}': {source}", path.display())]
    LogDirectory {
        /// Directory path.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The log file could not be opened.
    #[error("Failed to open log file in '{}': {source}", path.display())]
    LogFile {
        /// Directory path.
        path: PathBuf,
        /// Appender error.
        source: tracing_appender::rolling::InitError,
    },

    /// A global subscriber was already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Keeps the file writer alive; drop it last to flush buffered lines.
#[derive(Debug)]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns `TelemetryError` if the filter is invalid, the log file cannot be
/// opened, or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, TelemetryError> {
    let filter = build_filter(&config.level)?;

    let mut layers: Vec<BoxedLayer> = vec![console_layer(config.is_json())];

    let file_guard = match &config.directory {
        Some(directory) => {
            let (layer, guard) = file_layer(directory)?;
            layers.push(layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;

    tracing::debug!(
        level = %config.level,
        format = %config.format,
        directory = ?config.directory,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// `RUST_LOG` if set and valid, otherwise the configured level.
fn build_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env().or_else(|_| level_filter(level))
}

fn level_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(level).map_err(|source| TelemetryError::InvalidFilter {
        directive: level.to_string(),
        source,
    })
}

fn console_layer(json: bool) -> BoxedLayer {
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
    if json {
        layer.json().with_current_span(true).boxed()
    } else {
        layer.pretty().boxed()
    }
}

fn file_layer(directory: &Path) -> Result<(BoxedLayer, WorkerGuard), TelemetryError> {
    std::fs::create_dir_all(directory).map_err(|source| TelemetryError::LogDirectory {
        path: directory.to_path_buf(),
        source,
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(directory)
        .map_err(|source| TelemetryError::LogFile {
            path: directory.to_path_buf(),
            source,
        })?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .boxed();

    Ok((layer, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_levels_and_directives() {
        assert!(level_filter("info").is_ok());
        assert!(level_filter("warn,trading_bot=debug").is_ok());
    }

    #[test]
    fn rejects_invalid_level() {
        let err = level_filter("trading_bot=loud").unwrap_err();
        assert!(err.to_string().contains("trading_bot=loud"));
    }

    #[test]
    fn file_layer_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs");

        let (_layer, _guard) = file_layer(&nested).unwrap();

        assert!(nested.join("trading_bot.log").exists());
    }
}
