//! Logging infrastructure for adlens.
//!
//! Structured logging through the `tracing` ecosystem:
//!
//! - JSON lines written to `~/.adlens/logs/adlens.log` (daily rolling)
//! - Optional human-readable stderr output, only used outside the
//!   full-screen dashboard so log lines do not tear the terminal
//! - `-v` raises the default level from INFO to DEBUG; `RUST_LOG`
//!   overrides both
//!
//! ## Example
//!
//! ```no_run
//! use adlens_core::logging;
//!
//! let _guard = logging::init_logging(None, false, false).expect("logging init");
//! tracing::info!("adlens started");
//! tracing::debug!(records = 42, "records loaded");
//! ```

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::{AdlensError, Result};

/// Log file name inside the log directory.
pub const LOG_FILE_NAME: &str = "adlens.log";

/// Guard that must be held to ensure log flushing on shutdown.
///
/// Keep this guard alive for the lifetime of the application.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the adlens logging system.
///
/// # Arguments
///
/// * `log_dir` - Optional custom log directory. Defaults to `~/.adlens/logs/`
/// * `verbose` - If true, sets log level to DEBUG. Otherwise uses INFO.
/// * `console` - If true, also log to stderr in a compact format.
pub fn init_logging(log_dir: Option<PathBuf>, verbose: bool, console: bool) -> Result<LogGuard> {
    let log_dir = match log_dir {
        Some(dir) => dir,
        None => default_log_dir()?,
    };

    std::fs::create_dir_all(&log_dir).map_err(|e| AdlensError::DirectoryCreation {
        path: log_dir.clone(),
        source: e,
    })?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("adlens={default_level}")));

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_current_span(true)
        .with_span_list(true);

    let console_layer = console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(verbose)
            .with_line_number(verbose)
            .compact()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::debug!(log_dir = %log_dir.display(), verbose, console, "logging initialized");

    Ok(LogGuard {
        _file_guard: Some(file_guard),
    })
}

/// Base directory for adlens state (`~/.adlens`).
pub fn adlens_home() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AdlensError::internal("home directory could not be determined"))?;

    Ok(home.join(".adlens"))
}

/// Get the default log directory path (`~/.adlens/logs/`).
pub fn default_log_dir() -> Result<PathBuf> {
    Ok(adlens_home()?.join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_dir_is_under_adlens_home() {
        let dir = default_log_dir().unwrap();
        assert!(dir.ends_with(".adlens/logs"));
        assert!(dir.starts_with(adlens_home().unwrap()));
    }
}
