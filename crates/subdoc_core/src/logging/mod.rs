//! Logging for the subtitle document engine.
//!
//! The engine only emits `tracing` events. These helpers install a global
//! subscriber for binaries and tests:
//! - stderr output, filtered by `RUST_LOG` or a default level
//! - optional daily log files written on a background thread
//!
//! # Example
//!
//! ```no_run
//! use subdoc_core::logging::{init_tracing_with_file, LogLevel};
//!
//! // Keep the guard alive until exit so buffered lines are flushed.
//! let _guard = init_tracing_with_file(LogLevel::Info, ".logs");
//! tracing::info!("Ready");
//! ```

mod types;

use std::path::Path;

pub use types::LogLevel;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Prefix of daily log files.
pub const LOG_FILE_PREFIX: &str = "subdoc.log";

/// Initialize the global tracing subscriber, logging to stderr.
///
/// `RUST_LOG` takes precedence over `default_level`. Should be called once
/// at application startup.
pub fn init_tracing(default_level: LogLevel) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(env_filter(default_level))
        .init();
}

/// Like [`init_tracing`], also writing to a daily file in `logs_folder`.
///
/// File output goes through a background writer; dropping the returned
/// guard flushes it.
pub fn init_tracing_with_file(default_level: LogLevel, logs_folder: impl AsRef<Path>) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(logs_folder.as_ref(), LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .with(env_filter(default_level))
        .init();
    guard
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

fn env_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.as_filter()))
}
