//! Logging infrastructure for immersive-style.
//!
//! Structured logging via `tracing`:
//! - Writes to `logs/immersive-style.log` by default (cleared on each run)
//! - Optionally mirrors to stdout
//! - Configurable via the RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize logging system.
///
/// Creates the log directory if needed, clears the previous log file and
/// installs the global subscriber.
///
/// # Arguments
///
/// * `log_file` - Log file path (e.g., "logs/immersive-style.log")
/// * `stdout` - Also print events to stdout
/// * `debug` - Default to `debug` level instead of `info` when RUST_LOG is unset
///
/// # Errors
///
/// Returns error if the log directory cannot be created or the log file cannot be cleared
pub fn init_logging(log_file: &Path, stdout: bool, debug: bool) -> Result<LoggingGuard, io::Error> {
    let (log_dir, file_name) = prepare_log_file(log_file)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE)
        .pretty();

    let stdout_layer = stdout.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .with_target(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(env_filter(debug))
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Creates the parent directory of `log_file` and truncates the file.
///
/// Returns the directory and file name for the appender.
fn prepare_log_file(log_file: &Path) -> io::Result<(PathBuf, String)> {
    let log_dir = match log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = log_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("log path {} has no file name", log_file.display()),
            )
        })?;

    fs::create_dir_all(&log_dir)?;
    fs::write(log_dir.join(&file_name), "")?;

    Ok((log_dir, file_name))
}

/// RUST_LOG if set, otherwise `info` (or `debug`).
fn env_filter(debug: bool) -> EnvFilter {
    let default_level = if debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
