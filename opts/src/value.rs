//! Primitive option values and refinement of raw tokens.
//!
//! Every option has a primitive kind fixed by its sample value. Raw command
//! line tokens are refined into that kind with [`PrimitiveKind::refine`].

use std::fmt;

use serde::Serialize;

use crate::error::RefineError;

/// Kind tag of a [`Primitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// `true` / `false`.
    Boolean,
    /// Finite `f64`.
    Number,
    /// Any string.
    String,
}

impl PrimitiveKind {
    /// Returns the sample value used to seed option builders of this kind.
    pub fn sample(self) -> Primitive {
        match self {
            Self::Boolean => Primitive::Boolean(true),
            Self::Number => Primitive::Number(0.0),
            Self::String => Primitive::String(String::new()),
        }
    }

    /// Converts a raw token into a value of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use sch_cli_opts::{Primitive, PrimitiveKind};
    ///
    /// assert_eq!(PrimitiveKind::Boolean.refine("false").unwrap(), Primitive::Boolean(false));
    /// assert_eq!(PrimitiveKind::Number.refine("2.5").unwrap(), Primitive::Number(2.5));
    /// assert!(PrimitiveKind::Boolean.refine("yes").is_err());
    /// ```
    pub fn refine(self, raw: &str) -> Result<Primitive, RefineError> {
        match self {
            Self::Boolean => match raw {
                "true" => Ok(Primitive::Boolean(true)),
                "false" => Ok(Primitive::Boolean(false)),
                _ => Err(RefineError::NotBoolean(raw.to_string())),
            },
            Self::Number => raw
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Primitive::Number)
                .ok_or_else(|| RefineError::NotNumber(raw.to_string())),
            Self::String => Ok(Primitive::String(raw.to_string())),
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
        };
        f.write_str(s)
    }
}

/// A single option value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Primitive {
    /// Boolean value.
    Boolean(bool),
    /// Numeric value.
    Number(f64),
    /// String value.
    String(String),
}

impl Primitive {
    /// The value's kind.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Boolean(_) => PrimitiveKind::Boolean,
            Self::Number(_) => PrimitiveKind::Number,
            Self::String(_) => PrimitiveKind::String,
        }
    }

    /// Returns the boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number, if this is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// Value recorded for an option: a scalar, or every occurrence in order for
/// options that accept multiple values.
///
/// Serializes as the bare scalar or as an array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Value of a single-valued option.
    Single(Primitive),
    /// Values of a multi-valued option, in order of appearance.
    Multiple(Vec<Primitive>),
}

impl OptionValue {
    /// Returns the scalar, if this is a single value.
    pub fn as_single(&self) -> Option<&Primitive> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multiple(_) => None,
        }
    }

    /// Returns the values, if this is a multi-value.
    pub fn as_multiple(&self) -> Option<&[Primitive]> {
        match self {
            Self::Single(_) => None,
            Self::Multiple(values) => Some(values),
        }
    }

    /// Shorthand for the scalar string, if any.
    pub fn as_str(&self) -> Option<&str> {
        self.as_single().and_then(Primitive::as_str)
    }
}
