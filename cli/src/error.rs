//! Error type for the `sch` binary.

use sch_cli_opts::{MachineError, ParserError, RegistryError, SpecError};
use thiserror::Error;

/// Exit status for rejected command lines.
pub const EXIT_USAGE: i32 = 2;

/// Exit status for every other failure.
pub const EXIT_FAILURE: i32 = 1;

/// Errors that can end a `sch` run.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Config file could not be parsed or written.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Output could not be serialized.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown log format or level filter, or a subscriber already installed.
    #[error("logging error: {0}")]
    LoggingError(String),

    /// The builtin program spec is inconsistent.
    #[error("invalid program spec: {0}")]
    SpecError(#[from] SpecError),

    /// The builtin command registry is inconsistent.
    #[error("invalid command registry: {0}")]
    RegistryError(#[from] RegistryError),

    /// The parser machine failed while running.
    #[error("parser failure: {0}")]
    MachineError(#[from] MachineError),

    /// The command line was rejected.
    #[error("{0}")]
    ParseError(#[from] ParserError),

    /// A command resolved by the parser has no handler.
    #[error("no handler registered for '{0}'")]
    NoHandler(String),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ParseError(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}

/// Convenience alias for results with [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
