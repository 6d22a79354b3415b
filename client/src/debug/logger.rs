//! File-based logging initialization

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::{DebugConfig, LogFormat, DEFAULT_LOG_FILTER, LOG_FILE_PREFIX};

/// Initialize the logging system
///
/// Sets up a daily rolling file log under `config.log_dir`, filtered by
/// `RUST_LOG`, with non-blocking writes and a panic hook.
///
/// Returns the writer guard; logs are flushed when it is dropped, so keep it
/// alive for the lifetime of the program. `None` means logging could not be set up.
pub fn init(config: &DebugConfig) -> Option<WorkerGuard> {
    // Create logs directory if it doesn't exist
    if let Err(e) = fs::create_dir_all(&config.log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);
    // Source locations only when someone is reading debug output
    let verbose = config.is_debug_enabled();

    let initialized = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_current_span(true),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_thread_ids(verbose)
                    .with_file(verbose)
                    .with_line_number(verbose)
                    .with_ansi(false),
            )
            .try_init(),
    };

    if let Err(e) = initialized {
        eprintln!("Warning: Failed to install log subscriber: {}", e);
        return None;
    }

    tracing::info!(
        log_file = %config.log_file().display(),
        log_level = %config.log_level,
        format = ?config.format,
        "Logging initialized"
    );

    setup_panic_hook();

    Some(guard)
}

/// Set up panic hook to log panics with their location
fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic message".to_string()
        };

        tracing::error!(location = %location, message = %message, "Application panic");

        default_panic(panic_info);
    }));
}
