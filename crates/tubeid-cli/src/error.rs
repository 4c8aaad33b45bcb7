//! Error types for the command-line tool.

use std::path::PathBuf;

use thiserror::Error;

use crate::logging::LoggingError;

/// Result type alias using the CLI's error type.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that abort a `tubeid` run.
///
/// Inputs that yield no video ID are not errors here; they are counted and
/// reported per input.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error at {path}: {reason}")]
    Config {
        /// Path of the config file.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Create a configuration error for the given path.
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
