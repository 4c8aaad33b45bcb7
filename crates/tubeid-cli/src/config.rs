//! CLI configuration management.
//!
//! Settings live in a JSON file under the platform config directory. A missing
//! file means defaults; command-line flags override whatever was loaded.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;
use tubeid_core::VideoId;

use crate::error::{CliError, Result};
use crate::logging::LogRotation;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One value per line.
    #[default]
    Plain,
    /// One JSON object per input.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// What to print for each extracted ID in plain output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum UrlKind {
    /// The bare ID.
    #[default]
    None,
    /// Canonical watch page URL.
    Watch,
    /// Embeddable player URL.
    Embed,
    /// youtu.be share link.
    Short,
    /// Thumbnail image URL.
    Thumbnail,
    /// Highest-resolution thumbnail URL.
    ThumbnailMaxres,
}

impl UrlKind {
    /// Render an ID in this form.
    #[must_use]
    pub fn render(self, id: &VideoId) -> String {
        match self {
            Self::None => id.to_string(),
            Self::Watch => id.watch_url(),
            Self::Embed => id.embed_url(),
            Self::Short => id.short_url(),
            Self::Thumbnail => id.thumbnail_url(),
            Self::ThumbnailMaxres => id.thumbnail_url_maxres(),
        }
    }
}

/// Console log level as stored in the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    #[default]
    Warn,
    /// Informational messages.
    Info,
    /// Debug output.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// Raise the level by `steps` (each `-v` is one step), saturating at trace.
    #[must_use]
    pub const fn raised(self, steps: u8) -> Self {
        let mut level = self;
        let mut remaining = steps;
        while remaining > 0 {
            level = match level {
                Self::Error => Self::Warn,
                Self::Warn => Self::Info,
                Self::Info => Self::Debug,
                Self::Debug | Self::Trace => Self::Trace,
            };
            remaining -= 1;
        }
        level
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

/// Logging section of the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LoggingSettings {
    /// Console log level.
    #[serde(default)]
    pub console_level: LogLevel,
    /// Whether to also write JSON log files.
    #[serde(default)]
    pub file_logging: bool,
    /// Override for the log file directory.
    #[serde(default)]
    pub log_directory: Option<PathBuf>,
    /// Override for the log file rotation.
    #[serde(default)]
    pub rotation: Option<LogRotation>,
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CliConfig {
    /// Output format.
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Form in which IDs are printed.
    #[serde(default)]
    pub url_kind: UrlKind,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl CliConfig {
    /// Load configuration from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config(path, format!("Failed to read config file: {e}")))?;

        let config: Self = serde_json::from_str(&content)
            .map_err(|e| CliError::config(path, format!("Failed to parse config file: {e}")))?;

        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::config(path, format!("Failed to create config directory: {e}"))
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .map_err(|e| CliError::config(path, format!("Failed to write config file: {e}")))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }
}

/// Get the default config file path.
#[must_use]
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tubeid")
        .join("config.json")
}
