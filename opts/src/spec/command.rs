use crate::error::{Result, SpecError};

use super::option::OptionSpec;
use super::validate_name;

/// A leaf of the command tree: ordered positional arguments plus flags.
///
/// # Examples
///
/// ```
/// use sch_cli_opts::{CommandSpec, OptionSpec};
///
/// let init = CommandSpec::builder("init")
///     .arg(OptionSpec::string("path").optional().build()?)?
///     .flag(OptionSpec::string("store-type").optional().build()?)?
///     .build()?;
///
/// assert_eq!(init.name(), "init");
/// assert_eq!(init.args().len(), 1);
/// assert!(init.find_flag("--store-type").is_some());
/// assert!(init.find_flag("--unknown").is_none());
/// # Ok::<(), sch_cli_opts::SpecError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CommandSpec {
    name: String,
    description: Option<String>,
    args: Vec<OptionSpec>,
    flags: Vec<OptionSpec>,
}

impl CommandSpec {
    /// Starts a builder for a command called `name`.
    pub fn builder(name: &str) -> CommandSpecBuilder {
        CommandSpecBuilder::new(name)
    }

    /// Name matched against the command-line token.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Help text, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Positional arguments, in the order they are consumed.
    pub fn args(&self) -> &[OptionSpec] {
        &self.args
    }

    /// Flags, in declaration order.
    pub fn flags(&self) -> &[OptionSpec] {
        &self.flags
    }

    /// Looks up a positional argument by name.
    pub fn arg(&self, name: &str) -> Option<&OptionSpec> {
        self.args.iter().find(|a| a.name() == name)
    }

    /// Resolves a flag token such as `--store-type` or `-t`.
    pub fn find_flag(&self, token: &str) -> Option<&OptionSpec> {
        self.flags.iter().find(|f| f.matches_flag_token(token))
    }
}

/// Builder for [`CommandSpec`]. Each step validates eagerly.
#[derive(Debug)]
pub struct CommandSpecBuilder {
    name: String,
    description: Option<String>,
    args: Vec<OptionSpec>,
    flags: Vec<OptionSpec>,
}

impl CommandSpecBuilder {
    /// Creates an empty builder; same as [`CommandSpec::builder`].
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            args: Vec::new(),
            flags: Vec::new(),
        }
    }

    /// Sets the help text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a positional argument.
    ///
    /// # Errors
    ///
    /// - [`SpecError::DuplicateArg`] if the name is taken
    /// - [`SpecError::ArgAfterMultiple`] if the previous argument accepts
    ///   multiple values
    /// - [`SpecError::RequiredArgAfterOptional`] if a required argument
    ///   follows one that may be omitted
    pub fn arg(mut self, spec: OptionSpec) -> Result<Self> {
        if self.args.iter().any(|a| a.name() == spec.name()) {
            return Err(SpecError::DuplicateArg(spec.name().to_string()));
        }
        if let Some(last) = self.args.last() {
            if last.multiple() {
                return Err(SpecError::ArgAfterMultiple(spec.name().to_string()));
            }
            if spec.is_required() && !last.is_required() {
                return Err(SpecError::RequiredArgAfterOptional(spec.name().to_string()));
            }
        }
        self.args.push(spec);
        Ok(self)
    }

    /// Adds a flag.
    ///
    /// # Errors
    ///
    /// [`SpecError::DuplicateFlag`] if the name or short alias is taken. A
    /// single-character name and a short alias both answer to `-x`, so they
    /// collide with each other too.
    pub fn flag(mut self, spec: OptionSpec) -> Result<Self> {
        if self.flags.iter().any(|f| f.name() == spec.name()) {
            return Err(SpecError::DuplicateFlag(spec.name().to_string()));
        }
        if let Some(short) = spec.short() {
            if self.flags.iter().any(|f| answers_to_short(f, short)) {
                return Err(SpecError::DuplicateFlag(format!("-{short}")));
            }
        }
        if let Some(c) = single_char(spec.name()) {
            if self.flags.iter().any(|f| f.short() == Some(c)) {
                return Err(SpecError::DuplicateFlag(spec.name().to_string()));
            }
        }
        self.flags.push(spec);
        Ok(self)
    }

    /// Finishes the command.
    ///
    /// # Errors
    ///
    /// [`SpecError::InvalidName`] for an unusable command name.
    pub fn build(self) -> Result<CommandSpec> {
        validate_name(&self.name)?;
        Ok(CommandSpec {
            name: self.name,
            description: self.description,
            args: self.args,
            flags: self.flags,
        })
    }
}

fn single_char(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn answers_to_short(flag: &OptionSpec, short: char) -> bool {
    flag.short() == Some(short) || single_char(flag.name()) == Some(short)
}
