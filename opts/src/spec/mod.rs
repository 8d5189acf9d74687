//! Immutable descriptions of a program's command tree.
//!
//! A [`ProgramSpec`] is a root [`GroupSpec`]; groups hold [`CommandSpec`]s
//! and nested groups; commands hold positional and flag [`OptionSpec`]s.
//! Every level is assembled through a builder that rejects inconsistent
//! trees up front, so a built spec never needs re-validation.

mod command;
mod group;
mod option;

pub use command::{CommandSpec, CommandSpecBuilder};
pub use group::{GroupSpec, GroupSpecBuilder, ProgramSpec, ProgramSpecBuilder};
pub use option::{DefaultValue, OptionSpec, OptionSpecBuilder, OptionType};

use crate::error::{Result, SpecError};

/// Resolves the command at exactly `path` below `group`.
///
/// Every segment but the last must name a subgroup and the last must name a
/// command. Returns `None` for an empty path or any unresolvable segment.
pub fn find_command_spec<'a, S: AsRef<str>>(group: &'a GroupSpec, path: &[S]) -> Option<&'a CommandSpec> {
    let (last, parents) = path.split_last()?;
    find_group_spec(group, parents)?.command(last.as_ref())
}

/// Resolves the group at exactly `path` below `group`; an empty path yields
/// `group` itself.
pub fn find_group_spec<'a, S: AsRef<str>>(group: &'a GroupSpec, path: &[S]) -> Option<&'a GroupSpec> {
    path.iter()
        .try_fold(group, |current, name| current.group(name.as_ref()))
}

/// Names must be non-empty, free of whitespace, and must not start with
/// `-` (which would lex as a flag).
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.starts_with('-') || name.chars().any(char::is_whitespace) {
        return Err(SpecError::InvalidName(name.to_string()));
    }
    Ok(())
}
