use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{Result, SpecError};
use crate::process::Process;
use crate::value::{OptionValue, Primitive, PrimitiveKind};

use super::validate_name;

/// Rust types an option can be declared with.
///
/// Implemented for `bool`, `f64` and `String`, matching the three
/// [`PrimitiveKind`]s.
pub trait OptionType: Into<Primitive> + 'static {
    /// Kind recorded on the built [`OptionSpec`].
    const KIND: PrimitiveKind;
}

impl OptionType for bool {
    const KIND: PrimitiveKind = PrimitiveKind::Boolean;
}

impl OptionType for f64 {
    const KIND: PrimitiveKind = PrimitiveKind::Number;
}

impl OptionType for String {
    const KIND: PrimitiveKind = PrimitiveKind::String;
}

type DeriveFn = dyn Fn(&Process) -> Primitive + Send + Sync;

/// Fallback used when an option is absent from the command line.
#[derive(Clone)]
pub enum DefaultValue {
    /// Fixed value.
    Static(Primitive),
    /// Computed from the process context at the end of each parse.
    Derived(Arc<DeriveFn>),
}

impl DefaultValue {
    /// Resolves the default against a process context.
    pub fn resolve(&self, process: &Process) -> Primitive {
        match self {
            Self::Static(value) => value.clone(),
            Self::Derived(derive) => derive(process),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Description of one flag or positional argument.
///
/// Built through the typed constructors [`OptionSpec::boolean`],
/// [`OptionSpec::number`] and [`OptionSpec::string`]; the builder's type
/// parameter guarantees that a default matches the option's kind.
///
/// Options are required unless marked [`optional`](OptionSpecBuilder::optional)
/// or given a default.
///
/// # Examples
///
/// ```
/// use sch_cli_opts::{OptionSpec, PrimitiveKind};
///
/// let store_type = OptionSpec::string("store-type")
///     .short('t')
///     .optional()
///     .description("Backend to store logs in")
///     .build()?;
///
/// assert_eq!(store_type.name(), "store-type");
/// assert_eq!(store_type.kind(), PrimitiveKind::String);
/// assert!(store_type.optional());
/// assert!(!store_type.multiple());
/// # Ok::<(), sch_cli_opts::SpecError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OptionSpec {
    name: String,
    short: Option<char>,
    description: Option<String>,
    sample: Primitive,
    optional: bool,
    multiple: bool,
    default: Option<DefaultValue>,
}

impl OptionSpec {
    /// Starts a builder for an option of type `T`.
    pub fn of<T: OptionType>(name: &str) -> OptionSpecBuilder<T> {
        OptionSpecBuilder::new(name)
    }

    /// Starts a boolean option.
    pub fn boolean(name: &str) -> OptionSpecBuilder<bool> {
        Self::of(name)
    }

    /// Starts a numeric option.
    pub fn number(name: &str) -> OptionSpecBuilder<f64> {
        Self::of(name)
    }

    /// Starts a string option.
    pub fn string(name: &str) -> OptionSpecBuilder<String> {
        Self::of(name)
    }

    /// Flag name (without dashes) or positional argument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Single-character alias, if any.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// Help text, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Example value fixing the option's kind.
    pub fn sample(&self) -> &Primitive {
        &self.sample
    }

    /// Kind raw tokens are refined into.
    pub fn kind(&self) -> PrimitiveKind {
        self.sample.kind()
    }

    /// Whether the option was marked optional.
    pub fn optional(&self) -> bool {
        self.optional
    }

    /// Whether repeated occurrences are accepted.
    pub fn multiple(&self) -> bool {
        self.multiple
    }

    /// Default applied when the option is absent.
    pub fn default(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Whether parsing fails when the option is absent.
    pub fn is_required(&self) -> bool {
        !self.optional && self.default.is_none()
    }

    /// Matches a flag token: `--name`, `-name`, or `-x` for the short alias.
    pub fn matches_flag_token(&self, token: &str) -> bool {
        let Some(stripped) = token.strip_prefix('-') else {
            return false;
        };
        if stripped.trim_start_matches('-') == self.name {
            return true;
        }
        let mut chars = stripped.chars();
        matches!((self.short, chars.next(), chars.next()), (Some(short), Some(c), None) if c == short)
    }

    /// Resolves the default, wrapped in a one-element list for options
    /// accepting multiple values.
    pub fn default_value(&self, process: &Process) -> Option<OptionValue> {
        let value = self.default.as_ref()?.resolve(process);
        Some(if self.multiple {
            OptionValue::Multiple(vec![value])
        } else {
            OptionValue::Single(value)
        })
    }
}

/// Builder for [`OptionSpec`], typed by the option's value type.
pub struct OptionSpecBuilder<T> {
    name: String,
    short: Option<char>,
    description: Option<String>,
    optional: bool,
    multiple: bool,
    default: Option<DefaultValue>,
    _type: PhantomData<fn() -> T>,
}

impl<T: OptionType> OptionSpecBuilder<T> {
    /// Creates a builder; same as [`OptionSpec::of`].
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            short: None,
            description: None,
            optional: false,
            multiple: false,
            default: None,
            _type: PhantomData,
        }
    }

    /// Single-character alias, matched as `-x`.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Sets the help text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Absence is not an error.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Accept repeated occurrences, recorded as a list.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Fixed default used when the option is absent.
    pub fn default_value(mut self, value: impl Into<T>) -> Self {
        let value: T = value.into();
        self.default = Some(DefaultValue::Static(value.into()));
        self
    }

    /// Default computed from the process context when the option is absent.
    ///
    /// ```
    /// use sch_cli_opts::OptionSpec;
    ///
    /// let path = OptionSpec::string("path")
    ///     .default_with(|process| process.cwd().display().to_string())
    ///     .build()?;
    /// assert!(!path.is_required());
    /// # Ok::<(), sch_cli_opts::SpecError>(())
    /// ```
    pub fn default_with<F>(mut self, derive: F) -> Self
    where
        F: Fn(&Process) -> T + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::Derived(Arc::new(move |process: &Process| -> Primitive {
            derive(process).into()
        })));
        self
    }

    /// Finishes the option.
    ///
    /// # Errors
    ///
    /// [`SpecError::InvalidName`] for an unusable name,
    /// [`SpecError::InvalidShortFlag`] for a short alias that is not ASCII
    /// alphanumeric.
    pub fn build(self) -> Result<OptionSpec> {
        validate_name(&self.name)?;
        if let Some(short) = self.short.filter(|c| !c.is_ascii_alphanumeric()) {
            return Err(SpecError::InvalidShortFlag(short));
        }

        Ok(OptionSpec {
            name: self.name,
            short: self.short,
            description: self.description,
            sample: T::KIND.sample(),
            optional: self.optional,
            multiple: self.multiple,
            default: self.default,
        })
    }
}
