use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::value::{OptionValue, Primitive};

/// Category of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParserErrorKind {
    /// Unexpected, unrefinable, or missing positional argument.
    InvalidArg,
    /// Flag token not declared by the command.
    InvalidFlag,
    /// Flag value that cannot be refined into the flag's kind.
    InvalidFlagValue,
    /// Unknown command or group name, or no command reached.
    InvalidName,
    /// Single-valued flag given more than once.
    MultipleValuesNotAllowed,
    /// Non-boolean flag without a following value.
    NoValueFoundForFlag,
    /// Required flag absent, with no default.
    RequiredFlagNotFound,
}

impl ParserErrorKind {
    /// Kebab-case name, as shown to users and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArg => "invalid-arg",
            Self::InvalidFlag => "invalid-flag",
            Self::InvalidFlagValue => "invalid-flag-value",
            Self::InvalidName => "invalid-name",
            Self::MultipleValuesNotAllowed => "multiple-values-not-allowed",
            Self::NoValueFoundForFlag => "no-value-found-for-flag",
            Self::RequiredFlagNotFound => "required-flag-not-found",
        }
    }
}

impl fmt::Display for ParserErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parse failure: its kind plus an optional human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{kind}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
pub struct ParserError {
    kind: ParserErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ParserError {
    /// Creates an error without detail.
    pub fn new(kind: ParserErrorKind) -> Self {
        Self { kind, detail: None }
    }

    /// Creates an error carrying a detail message.
    pub fn with_detail(kind: ParserErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
        }
    }

    /// Category of the failure.
    pub fn kind(&self) -> ParserErrorKind {
        self.kind
    }

    /// Human-readable context, such as the offending token.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

/// Everything a parse produced.
///
/// On failure `error` is set and the other fields keep whatever was recorded
/// before the failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParserResult {
    names: Vec<String>,
    args: BTreeMap<String, OptionValue>,
    flags: BTreeMap<String, OptionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ParserError>,
}

impl ParserResult {
    /// Resolved group and command names, outermost first.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Positional argument values by name.
    pub fn args(&self) -> &BTreeMap<String, OptionValue> {
        &self.args
    }

    /// Value of one positional argument.
    pub fn arg(&self, name: &str) -> Option<&OptionValue> {
        self.args.get(name)
    }

    /// Flag values by flag name.
    pub fn flags(&self) -> &BTreeMap<String, OptionValue> {
        &self.flags
    }

    /// Value of one flag.
    pub fn flag(&self, name: &str) -> Option<&OptionValue> {
        self.flags.get(name)
    }

    /// The failure, if parsing stopped early.
    pub fn error(&self) -> Option<&ParserError> {
        self.error.as_ref()
    }

    /// Whether parsing succeeded.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Splits a finished parse into a successful [`Invocation`] or its error.
    pub fn into_result(self) -> Result<Invocation, ParserError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(Invocation {
                path: self.names,
                args: self.args,
                flags: self.flags,
            }),
        }
    }
}

/// A successfully parsed command line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invocation {
    path: Vec<String>,
    args: BTreeMap<String, OptionValue>,
    flags: BTreeMap<String, OptionValue>,
}

impl Invocation {
    /// Path of the invoked command, e.g. `["log", "init"]`.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Positional argument values by name.
    pub fn args(&self) -> &BTreeMap<String, OptionValue> {
        &self.args
    }

    /// Value of one positional argument.
    pub fn arg(&self, name: &str) -> Option<&OptionValue> {
        self.args.get(name)
    }

    /// Flag values by flag name.
    pub fn flags(&self) -> &BTreeMap<String, OptionValue> {
        &self.flags
    }

    /// Value of one flag.
    pub fn flag(&self, name: &str) -> Option<&OptionValue> {
        self.flags.get(name)
    }
}

/// Accumulates a [`ParserResult`] while the machine runs.
#[derive(Debug, Default)]
pub(crate) struct ParserResultBuilder {
    names: Vec<String>,
    args: BTreeMap<String, OptionValue>,
    flags: BTreeMap<String, OptionValue>,
    error: Option<ParserError>,
}

impl ParserResultBuilder {
    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn push_name(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    pub(crate) fn has_arg(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    pub(crate) fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    pub(crate) fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub(crate) fn record_arg(&mut self, name: &str, value: Primitive, multiple: bool) {
        record(&mut self.args, name, value, multiple);
    }

    pub(crate) fn record_flag(&mut self, name: &str, value: Primitive, multiple: bool) {
        record(&mut self.flags, name, value, multiple);
    }

    pub(crate) fn set_arg(&mut self, name: &str, value: OptionValue) {
        self.args.insert(name.to_string(), value);
    }

    pub(crate) fn set_flag(&mut self, name: &str, value: OptionValue) {
        self.flags.insert(name.to_string(), value);
    }

    /// Keeps the first error; later ones are ignored.
    pub(crate) fn fail(&mut self, error: ParserError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub(crate) fn build(self) -> ParserResult {
        ParserResult {
            names: self.names,
            args: self.args,
            flags: self.flags,
            error: self.error,
        }
    }
}

fn record(values: &mut BTreeMap<String, OptionValue>, name: &str, value: Primitive, multiple: bool) {
    if !multiple {
        values.insert(name.to_string(), OptionValue::Single(value));
        return;
    }
    match values.get_mut(name) {
        Some(OptionValue::Multiple(list)) => list.push(value),
        _ => {
            values.insert(name.to_string(), OptionValue::Multiple(vec![value]));
        }
    }
}
