//! Command line parsing driven by a [`sch_fsm::Machine`].

mod context;
mod result;
mod states;

use std::sync::Arc;

use sch_fsm::{Machine, MachineError};
use tracing::debug;

use crate::error::SpecError;
use crate::process::Process;
use crate::spec::ProgramSpec;

use context::ParseContext;
pub use result::{Invocation, ParserError, ParserErrorKind, ParserResult};
use result::ParserResultBuilder;

/// Parses token lists against a [`ProgramSpec`].
///
/// The parser machine is built once and reused; each call to
/// [`parse`](Parser::parse) runs it over a fresh context.
///
/// # Examples
///
/// ```
/// use sch_cli_opts::{CommandSpec, GroupSpec, OptionSpec, Parser, Process, ProgramSpec};
///
/// let init = CommandSpec::builder("init")
///     .flag(OptionSpec::string("store-type").optional().build()?)?
///     .build()?;
/// let program = ProgramSpec::builder("sch")
///     .group(GroupSpec::builder("log").command(init)?.build()?)?
///     .build()?;
///
/// let parser = Parser::new(program)?;
/// let result = parser.parse(&["log", "init", "--store-type", "gdrive"], &Process::default())?;
///
/// assert_eq!(result.names(), ["log", "init"]);
/// assert_eq!(result.flag("store-type").and_then(|v| v.as_str()), Some("gdrive"));
/// assert!(result.error().is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Parser {
    program: Arc<ProgramSpec>,
    machine: Machine<ParseContext>,
}

impl Parser {
    /// Creates a parser for `program`.
    ///
    /// # Errors
    ///
    /// [`SpecError::Machine`] if the internal parser machine fails to build.
    pub fn new(program: impl Into<Arc<ProgramSpec>>) -> Result<Self, SpecError> {
        Ok(Self {
            program: program.into(),
            machine: states::machine()?,
        })
    }

    /// The program this parser was built for.
    pub fn program(&self) -> &ProgramSpec {
        &self.program
    }

    /// Parses `tokens`, program name excluded.
    ///
    /// Parse failures do not make this return `Err`: they are reported on
    /// the returned [`ParserResult`], together with whatever was recorded
    /// before the failure. Defaults are resolved against `process` once all
    /// tokens are consumed.
    ///
    /// # Errors
    ///
    /// Returns a [`MachineError`] only if the parser machine itself takes an
    /// undeclared transition.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S], process: &Process) -> Result<ParserResult, MachineError> {
        let tokens: Vec<String> = tokens.iter().map(|t| t.as_ref().to_string()).collect();
        debug!(program = self.program.name(), tokens = tokens.len(), "parsing command line");

        let mut context = ParseContext::new(Arc::clone(&self.program), tokens);
        self.machine.run(&mut context)?;

        let (program, mut builder) = context.into_parts();
        if !builder.has_error() {
            complete(&program, &mut builder, process);
        }

        let result = builder.build();
        match result.error() {
            Some(error) => debug!(%error, names = ?result.names(), "parse failed"),
            None => debug!(names = ?result.names(), "parse succeeded"),
        }
        Ok(result)
    }
}

/// Checks that a command was reached, then fills absent options from their
/// defaults and reports required ones that are still missing.
fn complete(program: &ProgramSpec, builder: &mut ParserResultBuilder, process: &Process) {
    let Some(command) = program.find_command_spec(builder.names()) else {
        let detail = if builder.names().is_empty() {
            "no command given".to_string()
        } else {
            format!("'{}' is a group, not a command", builder.names().join(" "))
        };
        builder.fail(ParserError::with_detail(ParserErrorKind::InvalidName, detail));
        return;
    };

    for spec in command.args() {
        if builder.has_arg(spec.name()) {
            continue;
        }
        match spec.default_value(process) {
            Some(value) => builder.set_arg(spec.name(), value),
            None if spec.optional() => {}
            None => {
                builder.fail(ParserError::with_detail(
                    ParserErrorKind::InvalidArg,
                    format!("missing required argument '{}'", spec.name()),
                ));
                return;
            }
        }
    }

    for spec in command.flags() {
        if builder.has_flag(spec.name()) {
            continue;
        }
        match spec.default_value(process) {
            Some(value) => builder.set_flag(spec.name(), value),
            None if spec.optional() => {}
            None => {
                builder.fail(ParserError::with_detail(
                    ParserErrorKind::RequiredFlagNotFound,
                    format!("missing required flag '--{}'", spec.name()),
                ));
                return;
            }
        }
    }
}
