//! Observability configuration for logging.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Accepted values of `logging.format`.
pub const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObservabilityConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive. `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Console output format: `pretty` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for `trading_bot.log`; no file sink when absent.
    #[serde(default = "default_log_directory")]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            directory: default_log_directory(),
        }
    }
}

impl LoggingConfig {
    /// Whether console output is JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_log_directory() -> Option<PathBuf> {
    Some(PathBuf::from("logs"))
}
