//! Structured logging using tracing.
//!
//! Provides:
//! - Console output on stderr, so stdout stays machine-readable
//! - Optional file output with JSON formatting and rotation
//! - `RUST_LOG` override for the console filter

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Logging configuration options.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory where log files are stored.
    pub log_directory: PathBuf,
    /// Log file name prefix (e.g., "tubeid" -> "tubeid.2024-01-15.log").
    pub log_file_prefix: String,
    /// Maximum log level for console output.
    pub console_level: Level,
    /// Maximum log level for file output.
    pub file_level: Level,
    /// Whether to write log files at all.
    pub file_logging: bool,
    /// How often to rotate log files.
    pub rotation: LogRotation,
    /// Number of old log files to keep (0 = keep forever).
    pub max_log_files: usize,
    /// Whether to include ANSI color codes in console output.
    pub console_ansi: bool,
    /// Whether to include file/line info in logs.
    pub include_file_line: bool,
    /// Whether to include target module in logs.
    pub include_target: bool,
    /// Whether to log span events (enter/exit).
    pub log_span_events: bool,
}

/// Log rotation frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Create a new log file every minute (for testing).
    Minutely,
    /// Create a new log file every hour.
    Hourly,
    /// Create a new log file every day.
    Daily,
    /// Never rotate (single log file).
    Never,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Minutely => Self::MINUTELY,
            LogRotation::Hourly => Self::HOURLY,
            LogRotation::Daily => Self::DAILY,
            LogRotation::Never => Self::NEVER,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LoggingConfig {
    /// Verbose configuration for debug builds.
    #[must_use]
    pub fn development() -> Self {
        Self {
            log_directory: default_log_directory(),
            log_file_prefix: "tubeid".to_string(),
            console_level: Level::DEBUG,
            file_level: Level::TRACE,
            file_logging: false,
            rotation: LogRotation::Hourly,
            max_log_files: 24,
            console_ansi: stderr_is_terminal(),
            include_file_line: true,
            include_target: true,
            log_span_events: true,
        }
    }

    /// Quiet configuration: only warnings reach the console.
    #[must_use]
    pub fn production() -> Self {
        Self {
            log_directory: default_log_directory(),
            log_file_prefix: "tubeid".to_string(),
            console_level: Level::WARN,
            file_level: Level::DEBUG,
            file_logging: false,
            rotation: LogRotation::Daily,
            max_log_files: 7,
            console_ansi: stderr_is_terminal(),
            include_file_line: false,
            include_target: false,
            log_span_events: false,
        }
    }

    /// Detect configuration based on build type.
    #[must_use]
    pub fn auto() -> Self {
        if cfg!(debug_assertions) {
            Self::development()
        } else {
            Self::production()
        }
    }

    /// Set the log directory.
    #[must_use]
    pub fn with_log_directory(mut self, path: PathBuf) -> Self {
        self.log_directory = path;
        self
    }

    /// Set the console log level.
    #[must_use]
    pub const fn with_console_level(mut self, level: Level) -> Self {
        self.console_level = level;
        self
    }

    /// Enable or disable file logging.
    #[must_use]
    pub const fn with_file_logging(mut self, enabled: bool) -> Self {
        self.file_logging = enabled;
        self
    }

    /// Set the log rotation frequency.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: LogRotation) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Guard that keeps file logging active. Drop this to flush and close log files.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Initialize the logging system with the given configuration.
///
/// Returns a guard that must be kept alive for the duration of the program.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created, the file appender
/// cannot be built, or a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let span_events = if config.log_span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    // RUST_LOG wins over the configured level
    let console_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn")
            .add_directive(directive("tubeid", config.console_level)?)
            .add_directive(directive("tubeid_core", config.console_level)?),
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.console_ansi)
        .with_target(config.include_target)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .with_span_events(span_events.clone())
        .with_filter(console_filter);

    let (file_layer, file_guard) = if config.file_logging {
        let (writer, guard) = file_writer(config)?;
        let file_filter = EnvFilter::new(level_to_directive(config.file_level))
            .add_directive(directive("tubeid", config.file_level)?)
            .add_directive(directive("tubeid_core", config.file_level)?);
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(span_events)
            .json()
            .with_filter(file_filter);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Build the non-blocking rolling file writer.
fn file_writer(
    config: &LoggingConfig,
) -> Result<
    (
        tracing_appender::non_blocking::NonBlocking,
        tracing_appender::non_blocking::WorkerGuard,
    ),
    LoggingError,
> {
    if !config.log_directory.exists() {
        std::fs::create_dir_all(&config.log_directory).map_err(|e| {
            LoggingError::DirectoryCreationFailed {
                path: config.log_directory.clone(),
                reason: e.to_string(),
            }
        })?;
    }

    let mut builder = RollingFileAppender::builder()
        .rotation(config.rotation.into())
        .filename_prefix(&config.log_file_prefix)
        .filename_suffix("log");
    if config.max_log_files > 0 {
        builder = builder.max_log_files(config.max_log_files);
    }
    let appender = builder
        .build(&config.log_directory)
        .map_err(|e| LoggingError::AppenderInit(e.to_string()))?;

    Ok(tracing_appender::non_blocking(appender))
}

/// Get the default log directory.
#[must_use]
pub fn default_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tubeid")
        .join("logs")
}

/// Colour is only emitted when stderr is an interactive terminal.
fn stderr_is_terminal() -> bool {
    io::stderr().is_terminal()
}

fn directive(target: &str, level: Level) -> Result<Directive, LoggingError> {
    let raw = format!("{target}={}", level_to_directive(level));
    raw.parse::<Directive>()
        .map_err(|e| LoggingError::InvalidDirective {
            directive: raw.clone(),
            reason: e.to_string(),
        })
}

/// Convert a tracing Level to a filter directive string.
const fn level_to_directive(level: Level) -> &'static str {
    match level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// Errors that can occur during logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to create the log directory.
    #[error("Failed to create log directory {path}: {reason}")]
    DirectoryCreationFailed {
        /// The path that could not be created.
        path: PathBuf,
        /// The reason for the failure.
        reason: String,
    },

    /// The rolling file appender could not be built.
    #[error("Failed to initialize log file appender: {0}")]
    AppenderInit(String),

    /// A filter directive did not parse.
    #[error("Invalid log directive {directive}: {reason}")]
    InvalidDirective {
        /// The directive text.
        directive: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber was already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_production() {
        let config = LoggingConfig::default();
        assert_eq!(config.console_level, Level::WARN);
        assert_eq!(config.file_level, Level::DEBUG);
        assert_eq!(config.rotation, LogRotation::Daily);
        assert!(!config.file_logging);
    }

    #[test]
    fn test_console_ansi_follows_stderr() {
        let tty = io::stderr().is_terminal();
        assert_eq!(LoggingConfig::production().console_ansi, tty);
        assert_eq!(LoggingConfig::development().console_ansi, tty);
    }

    #[test]
    fn test_development_config() {
        let config = LoggingConfig::development();
        assert_eq!(config.console_level, Level::DEBUG);
        assert_eq!(config.file_level, Level::TRACE);
        assert_eq!(config.rotation, LogRotation::Hourly);
        assert!(config.include_file_line);
        assert!(config.log_span_events);
    }

    #[test]
    fn test_config_builder() {
        let config = LoggingConfig::production()
            .with_console_level(Level::INFO)
            .with_file_logging(true)
            .with_rotation(LogRotation::Never)
            .with_log_directory(PathBuf::from("/tmp/tubeid-logs"));

        assert_eq!(config.console_level, Level::INFO);
        assert!(config.file_logging);
        assert_eq!(config.rotation, LogRotation::Never);
        assert_eq!(config.log_directory, PathBuf::from("/tmp/tubeid-logs"));
    }

    #[test]
    fn test_log_rotation_conversion() {
        assert_eq!(Rotation::from(LogRotation::Minutely), Rotation::MINUTELY);
        assert_eq!(Rotation::from(LogRotation::Hourly), Rotation::HOURLY);
        assert_eq!(Rotation::from(LogRotation::Daily), Rotation::DAILY);
        assert_eq!(Rotation::from(LogRotation::Never), Rotation::NEVER);
    }

    #[test]
    fn test_directive_parses() {
        for level in [Level::TRACE, Level::DEBUG, Level::INFO, Level::WARN, Level::ERROR] {
            assert!(directive("tubeid_core", level).is_ok());
        }
    }

    #[test]
    fn test_file_writer_creates_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("logs");
        let config = LoggingConfig::production()
            .with_log_directory(dir.clone())
            .with_rotation(LogRotation::Never);

        let (_writer, _guard) = file_writer(&config).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_default_log_directory() {
        let dir = default_log_directory();
        assert!(dir.to_string_lossy().contains("tubeid"));
        assert!(dir.to_string_lossy().contains("logs"));
    }
}
