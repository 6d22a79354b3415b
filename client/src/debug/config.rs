//! Logging configuration from environment variables

use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "checkfood=info,warn";
pub const LOG_FILE_PREFIX: &str = "checkfood.log";

/// Output format of the file log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Directory holding the daily rolling log files
    pub log_dir: PathBuf,
    /// Log level filter (e.g., "checkfood=debug,info")
    pub log_level: String,
    pub format: LogFormat,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: default_filter().to_string(),
            format: LogFormat::Text,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let log_dir = std::env::var("CHECKFOOD_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"));

        let format = match std::env::var("CHECKFOOD_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            log_dir,
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter().to_string()),
            format,
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_PREFIX)
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}

/// `debug-mode` builds log request details by default.
fn default_filter() -> &'static str {
    if super::is_debug_mode() {
        "checkfood=debug,info"
    } else {
        DEFAULT_LOG_FILTER
    }
}
