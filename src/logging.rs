//! Diagnostic log setup.
//!
//! Logs go to an append-only file. stdout carries tool replies when serving,
//! so the subscriber never writes there.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogSettings;
use crate::error::ConfigError;

pub const DEFAULT_LOG_FILE: &str = "mcp_server.log";
pub const DEFAULT_LOG_FILTER: &str = "info";

const REDACTED: &str = "[REDACTED]";

/// Install the global subscriber writing to `settings.path`.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_logging(settings: &LogSettings) -> Result<(), ConfigError> {
    let file = open_log_file(&settings.path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}

/// Open `path` for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> Result<File, ConfigError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ConfigError::LogFile {
            path: path.display().to_string(),
            source,
        })
}

/// Strip a secret out of text bound for a log line or a tool reply.
pub fn redact(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, REDACTED)
}
