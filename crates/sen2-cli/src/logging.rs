// Rust guideline compliant 2026-10-17

//! Diagnostic logging setup.

use crate::terminal::stderr_is_terminal;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;

/// Maps the `-v` count to a log level: none ERROR, 1 WARN, 2 INFO, 3+ DEBUG.
#[must_use]
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Installs the global subscriber, writing JSON lines to `log_file` or text
/// to stderr.
///
/// The returned guard flushes the file writer on drop and must be held
/// until the process exits.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_tracing(verbose: u8, log_file: Option<&Path>) -> std::io::Result<Option<WorkerGuard>> {
    let level = level_for_verbosity(verbose);

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).write(true).truncate(true).open(path)?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        let subscriber = fmt()
            .with_max_level(level)
            .with_target(false)
            .json()
            .with_writer(writer)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
        return Ok(Some(guard));
    }

    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(stderr_is_terminal())
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(None)
}
