//! # Logging Infrastructure
//!
//! File-based structured logging for the CheckFood client.
//!
//! ## Features
//!
//! - **File-based logging**: `logs/checkfood.log.YYYY-MM-DD` (daily rotation)
//! - **Text or JSON output**: `CHECKFOOD_LOG_FORMAT=json` for machine-readable logs
//! - **Panic hook**: panics are logged with their location before unwinding
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default `checkfood=info,warn`)
//! - `CHECKFOOD_LOG_DIR`: Log directory (default `logs`)
//! - `CHECKFOOD_LOG_FORMAT`: `text` or `json`

pub mod config;
pub mod logger;

pub use config::{DebugConfig, LogFormat};

/// Initialize logging from the environment.
///
/// Call this at application startup, before any other operations, and keep
/// the returned guard alive until exit.
///
/// ```rust,no_run
/// let _log_guard = checkfood::debug::init();
/// ```
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let config = DebugConfig::from_env();
    logger::init(&config)
}

/// Check if debug mode is enabled via feature flag
pub fn is_debug_mode() -> bool {
    cfg!(feature = "debug-mode")
}
