//! Construction-time error types.
//!
//! Parse-time failures are data, not errors of this kind: they are carried on
//! the [`ParserResult`](crate::ParserResult) as a
//! [`ParserError`](crate::ParserError).

use sch_fsm::MachineError;
use thiserror::Error;

/// Errors raised while assembling option, command, group, or program specs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// Name is empty, contains whitespace, or starts with `-`.
    #[error("invalid name '{0}': names must be non-empty, contain no whitespace and not start with '-'")]
    InvalidName(String),

    /// Short flag alias is not a single ASCII alphanumeric character.
    #[error("invalid short flag alias '{0}'")]
    InvalidShortFlag(char),

    /// Two commands in the same group share a name.
    #[error("duplicate command in group: {0}")]
    DuplicateCommand(String),

    /// Two subgroups in the same group share a name.
    #[error("duplicate group in group: {0}")]
    DuplicateGroup(String),

    /// A command and a subgroup of the same group share a name.
    #[error("name is used by both a command and a group: {0}")]
    NameConflict(String),

    /// Two flags of one command share a name or short alias.
    #[error("duplicate flag in command: {0}")]
    DuplicateFlag(String),

    /// Two positional arguments of one command share a name.
    #[error("duplicate argument in command: {0}")]
    DuplicateArg(String),

    /// A required positional follows an optional one.
    #[error("required argument '{0}' follows an optional argument")]
    RequiredArgAfterOptional(String),

    /// A positional follows one that accepts multiple values.
    #[error("argument '{0}' follows an argument that accepts multiple values")]
    ArgAfterMultiple(String),

    /// The parser's own state machine failed validation.
    #[error("parser machine error: {0}")]
    Machine(#[from] MachineError),
}

/// Errors raised while assembling a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// An entry or sub-registry name was registered twice.
    #[error("duplicate registry name: {0}")]
    DuplicateName(String),

    /// A default entry was registered twice.
    #[error("registry already has a default entry")]
    DuplicateDefault,
}

/// Raw token that cannot be converted into an option's primitive kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefineError {
    /// Booleans accept exactly `true` or `false`.
    #[error("expected 'true' or 'false', got '{0}'")]
    NotBoolean(String),

    /// Not a finite number.
    #[error("expected a number, got '{0}'")]
    NotNumber(String),
}

/// Convenience alias for results with [`SpecError`].
pub type Result<T> = std::result::Result<T, SpecError>;
