//! Tracing subscriber setup.
//!
//! The libraries only emit `tracing` events; this module decides where they
//! go. Events are written to stderr so stdout stays machine-readable.
//!
//! Level precedence: `--log-level`, `SCH_LOG_LEVEL`, `RUST_LOG`, the config
//! file, then `warn`. Format precedence: `--log-format`, `SCH_LOG_FORMAT`, the
//! config file, then `compact`.

use std::fmt;
use std::str::FromStr;

use sch_cli_opts::Process;
use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::LogConfig;
use crate::error::{CliError, Result};

pub const LEVEL_ENV: &str = "SCH_LOG_LEVEL";
pub const FORMAT_ENV: &str = "SCH_LOG_FORMAT";
const DEFAULT_LEVEL: &str = "warn";

/// Log output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line events.
    #[default]
    Compact,
    /// Multi-line events with source locations.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown log format: {s}")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        };
        f.write_str(s)
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub format: LogFormat,
}

/// Applies the precedence rules to the flag values, environment and config.
///
/// # Errors
///
/// Returns [`CliError::LoggingError`] if `SCH_LOG_FORMAT` names an unknown
/// format.
pub fn resolve(
    level: Option<&str>,
    format: Option<LogFormat>,
    config: &LogConfig,
    process: &Process,
) -> Result<LogSettings> {
    let filter = level
        .or_else(|| process.env(LEVEL_ENV))
        .or_else(|| process.env("RUST_LOG"))
        .or(config.level.as_deref())
        .unwrap_or(DEFAULT_LEVEL)
        .to_string();

    let format = match format {
        Some(format) => format,
        None => match process.env(FORMAT_ENV) {
            Some(raw) => raw.parse().map_err(CliError::LoggingError)?,
            None => config.format.unwrap_or_default(),
        },
    };

    Ok(LogSettings { filter, format })
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns [`CliError::LoggingError`] if the filter directive is invalid or
/// a subscriber is already installed.
pub fn init(settings: &LogSettings) -> Result<()> {
    let filter = EnvFilter::try_new(&settings.filter)
        .map_err(|e| CliError::LoggingError(format!("invalid log level '{}': {e}", settings.filter)))?;

    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let installed = match settings.format {
        LogFormat::Compact => Registry::default()
            .with(filter)
            .with(layer.compact().with_target(false).with_span_events(FmtSpan::NONE))
            .try_init(),
        LogFormat::Pretty => Registry::default()
            .with(filter)
            .with(layer.pretty().with_file(true).with_line_number(true))
            .try_init(),
        LogFormat::Json => Registry::default()
            .with(filter)
            .with(layer.json().with_current_span(false))
            .try_init(),
    };

    installed.map_err(|e| CliError::LoggingError(e.to_string()))
}
