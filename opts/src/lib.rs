//! Declarative command line specs and a state-machine driven parser.
//!
//! A program describes its command tree with immutable specs:
//!
//! - [`OptionSpec`]: a flag or positional argument of a fixed
//!   [`PrimitiveKind`], optional or required, single or multi-valued, with an
//!   optional static or process-derived default.
//! - [`CommandSpec`]: ordered positional arguments plus flags.
//! - [`GroupSpec`] / [`ProgramSpec`]: named nodes holding commands and
//!   nested groups.
//!
//! [`Parser`] turns a token list into a [`ParserResult`] holding the resolved
//! command path, refined argument and flag values, and at most one
//! [`ParserError`]. A [`Registry`] then maps the resolved path to whatever
//! the program attaches to it, usually a handler.
//!
//! # Example
//!
//! ```
//! use sch_cli_opts::{
//!     CommandSpec, GroupSpec, OptionSpec, ParserErrorKind, Parser, Process, ProgramSpec,
//! };
//!
//! let init = CommandSpec::builder("init")
//!     .arg(OptionSpec::string("path").default_with(|p| p.cwd().display().to_string()).build()?)?
//!     .flag(OptionSpec::boolean("force").optional().build()?)?
//!     .build()?;
//! let program = ProgramSpec::builder("sch")
//!     .group(GroupSpec::builder("log").command(init)?.build()?)?
//!     .build()?;
//! let parser = Parser::new(program)?;
//!
//! let process = Process::new(Vec::new(), "/work", Default::default());
//! let invocation = parser.parse(&["log", "init", "--force"], &process)?.into_result()?;
//! assert_eq!(invocation.arg("path").and_then(|v| v.as_str()), Some("/work"));
//!
//! let failed = parser.parse(&["log", "init", "--bogus"], &process)?;
//! assert_eq!(failed.error().map(|e| e.kind()), Some(ParserErrorKind::InvalidFlag));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod parse;
mod process;
mod registry;
mod spec;
mod value;

pub use error::{RefineError, RegistryError, Result, SpecError};
pub use parse::{Invocation, Parser, ParserError, ParserErrorKind, ParserResult};
pub use process::Process;
pub use registry::{Registry, RegistryBuilder};
pub use spec::{
    find_command_spec, find_group_spec, CommandSpec, CommandSpecBuilder, DefaultValue, GroupSpec,
    GroupSpecBuilder, OptionSpec, OptionSpecBuilder, OptionType, ProgramSpec, ProgramSpecBuilder,
};
pub use value::{OptionValue, Primitive, PrimitiveKind};

/// Re-exported so callers can handle [`Parser::parse`] failures without a
/// direct dependency.
pub use sch_fsm::MachineError;
