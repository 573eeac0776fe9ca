//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/limber/limber.log` (or platform equivalent)
//! with 5 MB size-based rotation. Set `DEBUG_LOGGING=1` to enable debug
//! output for limber crates.
//!
//! There is no stdout layer: the terminal belongs to the renderer while a
//! session runs.

use std::path::PathBuf;

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;

/// Initialize file logging.
///
/// Returns a `WorkerGuard` that MUST be held for the application lifetime
/// to ensure all buffered logs are flushed on shutdown. Returns `None` when
/// the log file cannot be opened; logging is then disabled.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let log_dir = log_directory()?;
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // Can't use tracing yet since subscriber not initialized
        eprintln!(
            "Failed to create log directory {:?}: {}, logging disabled",
            log_dir, e
        );
        return None;
    }

    let log_path = log_dir.join("limber.log");
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(MAX_LOG_BYTES),
        1, // limber.log and limber.log.1
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(EnvFilter::new(filter_directive(debug_logging)))
        .init();

    tracing::info!(
        log_file = ?log_path,
        debug_logging,
        "Limber logging initialized"
    );

    Some(guard)
}

fn log_directory() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join("limber"))
}

fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        "info,limber=debug,limber_core=debug"
    } else {
        "info"
    }
}
