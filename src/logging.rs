//! Logging setup
//!
//! Log lines go to stderr and, when it can be opened, to the configured log
//! file. Stdout is reserved for the MCP stdio transport. Verbosity follows
//! `RUST_LOG`, defaulting to [`DEFAULT_LOG_FILTER`].

use std::{
    fs::{File, OpenOptions},
    io,
    path::Path,
    sync::Mutex,
};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{DEFAULT_LOG_FILTER, ServerConfig};

/// Opens the log file for appending, creating it if needed
pub fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global tracing subscriber
///
/// Must be called once, before any other logging. Returns `false` when the
/// log file could not be opened and only stderr logging is active.
pub fn init(config: &ServerConfig) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false);

    let (file_layer, open_error) = match open_log_file(&config.log_file) {
        Ok(file) => {
            let layer = fmt::layer().with_writer(Mutex::new(file)).with_ansi(false);
            (Some(layer), None)
        }
        Err(e) => (None, Some(e)),
    };
    let file_logging = file_layer.is_some();

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(e) = open_error {
        tracing::warn!(
            "Could not open log file {}: {}; logging to stderr only",
            config.log_file.display(),
            e
        );
    }

    file_logging
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_open_log_file_appends() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("server.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_in_missing_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(open_log_file(&tmp.path().join("no/such/dir.log")).is_err());
    }
}
