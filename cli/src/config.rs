//! Optional YAML configuration for the `sch` binary.
//!
//! Read from `--config <path>` or `SCH_CONFIG`. Every field is optional;
//! command line flags and environment variables take precedence.
//!
//! # Example YAML
//!
//! ```yaml
//! log:
//!   level: debug
//!   format: json
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::logging::LogFormat;

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level or `EnvFilter` directive, e.g. `debug` or `sch_fsm=trace`.
    pub level: Option<String>,
    /// Output format.
    pub format: Option<LogFormat>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub log: LogConfig,
}

impl CliConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::error::CliError::IoError) if the file
    /// cannot be read, or [`YamlError`](crate::error::CliError::YamlError)
    /// if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::error::CliError::IoError) if the file
    /// cannot be written, or [`YamlError`](crate::error::CliError::YamlError)
    /// if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
