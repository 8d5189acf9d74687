use crate::error::{Result, SpecError};

use super::command::CommandSpec;
use super::{find_command_spec, find_group_spec, validate_name};

/// A named node of the command tree holding commands and nested groups.
///
/// Within one group every command and subgroup name is unique, and no name
/// is used by both a command and a subgroup.
#[derive(Debug, Clone)]
pub struct GroupSpec {
    name: String,
    description: Option<String>,
    commands: Vec<CommandSpec>,
    groups: Vec<GroupSpec>,
}

impl GroupSpec {
    /// Starts a builder for a group called `name`.
    pub fn builder(name: &str) -> GroupSpecBuilder {
        GroupSpecBuilder::new(name)
    }

    /// Name matched against the command-line token.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Help text, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Commands in declaration order.
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Subgroups in declaration order.
    pub fn groups(&self) -> &[GroupSpec] {
        &self.groups
    }

    /// Direct child command by name.
    pub fn command(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name() == name)
    }

    /// Direct child group by name.
    pub fn group(&self, name: &str) -> Option<&GroupSpec> {
        self.groups.iter().find(|g| g.name() == name)
    }

    /// See [`find_command_spec`].
    pub fn find_command<S: AsRef<str>>(&self, path: &[S]) -> Option<&CommandSpec> {
        find_command_spec(self, path)
    }

    /// See [`find_group_spec`].
    pub fn find_group<S: AsRef<str>>(&self, path: &[S]) -> Option<&GroupSpec> {
        find_group_spec(self, path)
    }
}

/// Builder shared by [`GroupSpec`] and [`ProgramSpec`].
#[derive(Debug)]
pub struct GroupSpecBuilder {
    name: String,
    description: Option<String>,
    commands: Vec<CommandSpec>,
    groups: Vec<GroupSpec>,
}

impl GroupSpecBuilder {
    /// Creates an empty builder; same as [`GroupSpec::builder`].
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            commands: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Sets the help text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a command.
    ///
    /// # Errors
    ///
    /// [`SpecError::DuplicateCommand`] or [`SpecError::NameConflict`] if the
    /// name is already used in this group.
    pub fn command(mut self, spec: CommandSpec) -> Result<Self> {
        if self.commands.iter().any(|c| c.name() == spec.name()) {
            return Err(SpecError::DuplicateCommand(spec.name().to_string()));
        }
        if self.groups.iter().any(|g| g.name() == spec.name()) {
            return Err(SpecError::NameConflict(spec.name().to_string()));
        }
        self.commands.push(spec);
        Ok(self)
    }

    /// Adds a subgroup.
    ///
    /// # Errors
    ///
    /// [`SpecError::DuplicateGroup`] or [`SpecError::NameConflict`] if the
    /// name is already used in this group.
    pub fn group(mut self, spec: GroupSpec) -> Result<Self> {
        if self.groups.iter().any(|g| g.name() == spec.name()) {
            return Err(SpecError::DuplicateGroup(spec.name().to_string()));
        }
        if self.commands.iter().any(|c| c.name() == spec.name()) {
            return Err(SpecError::NameConflict(spec.name().to_string()));
        }
        self.groups.push(spec);
        Ok(self)
    }

    /// # Errors
    ///
    /// [`SpecError::InvalidName`] for an unusable group name.
    pub fn build(self) -> Result<GroupSpec> {
        validate_name(&self.name)?;
        Ok(GroupSpec {
            name: self.name,
            description: self.description,
            commands: self.commands,
            groups: self.groups,
        })
    }
}

/// The root of a command tree: a named, top-level group.
///
/// # Examples
///
/// ```
/// use sch_cli_opts::{CommandSpec, GroupSpec, ProgramSpec};
///
/// let program = ProgramSpec::builder("sch")
///     .group(
///         GroupSpec::builder("log")
///             .command(CommandSpec::builder("init").build()?)?
///             .build()?,
///     )?
///     .build()?;
///
/// assert_eq!(program.find_command_spec(&["log", "init"]).map(|c| c.name()), Some("init"));
/// assert!(program.find_command_spec(&["log"]).is_none());
/// assert_eq!(program.find_group_spec(&["log"]).map(|g| g.name()), Some("log"));
/// # Ok::<(), sch_cli_opts::SpecError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProgramSpec {
    root: GroupSpec,
}

impl ProgramSpec {
    /// Starts a builder for a program called `name`.
    pub fn builder(name: &str) -> ProgramSpecBuilder {
        ProgramSpecBuilder {
            inner: GroupSpecBuilder::new(name),
        }
    }

    /// Program name.
    pub fn name(&self) -> &str {
        self.root.name()
    }

    /// Help text, if any.
    pub fn description(&self) -> Option<&str> {
        self.root.description()
    }

    /// Top-level group; an empty path resolves to it.
    pub fn root(&self) -> &GroupSpec {
        &self.root
    }

    /// See [`find_command_spec`](super::find_command_spec).
    pub fn find_command_spec<S: AsRef<str>>(&self, path: &[S]) -> Option<&CommandSpec> {
        find_command_spec(&self.root, path)
    }

    /// See [`find_group_spec`](super::find_group_spec).
    pub fn find_group_spec<S: AsRef<str>>(&self, path: &[S]) -> Option<&GroupSpec> {
        find_group_spec(&self.root, path)
    }
}

/// Builder for [`ProgramSpec`], with the same checks as [`GroupSpecBuilder`].
#[derive(Debug)]
pub struct ProgramSpecBuilder {
    inner: GroupSpecBuilder,
}

impl ProgramSpecBuilder {
    /// Sets the help text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner = self.inner.description(description);
        self
    }

    /// See [`GroupSpecBuilder::command`].
    pub fn command(mut self, spec: CommandSpec) -> Result<Self> {
        self.inner = self.inner.command(spec)?;
        Ok(self)
    }

    /// See [`GroupSpecBuilder::group`].
    pub fn group(mut self, spec: GroupSpec) -> Result<Self> {
        self.inner = self.inner.group(spec)?;
        Ok(self)
    }

    /// Finishes the program.
    ///
    /// # Errors
    ///
    /// [`SpecError::InvalidName`] for an unusable program name.
    pub fn build(self) -> Result<ProgramSpec> {
        Ok(ProgramSpec {
            root: self.inner.build()?,
        })
    }
}
