//! Structured logger facade over [`tracing`].
use std::path::{Path, PathBuf};

use super::subscriber::STAGE_TARGET;
use super::utils::log_file_path;

/// Structured logger used by commands and the link engine.
///
/// Messages go through [`tracing`]; [`init_subscriber`](super::init_subscriber)
/// decides where they end up. Without a subscriber every call is a no-op,
/// which is what unit tests rely on.
#[derive(Debug)]
pub struct Logger {
    log_file: PathBuf,
}

impl Logger {
    /// Create a logger for `command`.
    ///
    /// Only records the log file path for display; the file itself is
    /// created by the subscriber.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Path of the persistent log file for this run.
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_file
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (hidden on the console unless `DOTLINK_LOG` allows
    /// it; always written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }
}
