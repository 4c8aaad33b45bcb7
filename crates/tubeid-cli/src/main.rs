//! Tubeid - extract YouTube video IDs from URLs or bare IDs.
//!
//! Inputs come from the command line, or one per line from stdin when none are
//! given. Exit status is 0 when every input yielded an ID, 1 when any did not,
//! and 2 when the run itself failed.

mod config;
mod error;
mod logging;
mod output;
#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test_support;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::{debug, info};

use config::{CliConfig, OutputFormat, UrlKind, default_config_path};
use error::Result;
use logging::LoggingConfig;
use output::{OutputSettings, Summary, process_inputs, read_lines};

/// Extract YouTube video IDs from URLs or bare IDs.
#[derive(Debug, Parser)]
#[command(name = "tubeid", version, about)]
struct Cli {
    /// URLs or IDs to resolve. Reads lines from stdin if omitted.
    inputs: Vec<String>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Print a URL built from the ID instead of the bare ID.
    #[arg(long, value_enum)]
    url: Option<UrlKind>,

    /// Path to the config file.
    #[arg(long, env = "TUBEID_CONFIG")]
    config: Option<PathBuf>,

    /// Also write JSON log files.
    #[arg(long)]
    log_file: bool,

    /// Write the effective configuration to the config file before running.
    #[arg(long)]
    save_config: bool,

    /// Increase console log verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Merge flags over the loaded config.
    fn apply_overrides(&self, mut config: CliConfig) -> CliConfig {
        if let Some(format) = self.format {
            config.output_format = format;
        }
        if let Some(url) = self.url {
            config.url_kind = url;
        }
        if self.log_file {
            config.logging.file_logging = true;
        }
        config.logging.console_level = config.logging.console_level.raised(self.verbose);
        config
    }
}

fn logging_config(config: &CliConfig) -> LoggingConfig {
    let mut logging = LoggingConfig::auto()
        .with_console_level(config.logging.console_level.into())
        .with_file_logging(config.logging.file_logging);
    if let Some(dir) = &config.logging.log_directory {
        logging = logging.with_log_directory(dir.clone());
    }
    if let Some(rotation) = config.logging.rotation {
        logging = logging.with_rotation(rotation);
    }
    logging
}

/// Log where the configuration came from. Called once logging is up.
fn report_config_source(path: &Path) {
    if path.exists() {
        info!("Loaded config from {}", path.display());
    } else {
        debug!("Config file {} not found, using defaults", path.display());
    }
}

fn run(cli: Cli) -> Result<Summary> {
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = cli.apply_overrides(CliConfig::load_from(&config_path)?);

    let _guard = logging::init(&logging_config(&config))?;
    report_config_source(&config_path);
    debug!(config = ?config, "Effective configuration");

    if cli.save_config {
        config.save_to(&config_path)?;
    }

    let settings = OutputSettings {
        format: config.output_format,
        url_kind: config.url_kind,
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let summary = if cli.inputs.is_empty() {
        debug!("Reading inputs from stdin");
        process_inputs(read_lines(io::stdin().lock()), settings, &mut out, &mut err)?
    } else {
        process_inputs(cli.inputs.into_iter().map(Ok), settings, &mut out, &mut err)?
    };

    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Finished"
    );
    Ok(summary)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(summary) if summary.all_succeeded() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            eprintln!("tubeid: {e}");
            ExitCode::from(2)
        }
    }
}
