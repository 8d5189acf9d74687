//! The builtin `sch` program: its command tree and the handlers bound to it.

use std::io::Write;

use sch_cli_opts::{
    CommandSpec, GroupSpec, Invocation, OptionSpec, Process, ProgramSpec, Registry, RegistryError,
    SpecError,
};
use tracing::info;

use crate::error::Result;

/// A runnable command, looked up by its resolved path.
pub trait Command {
    /// Runs the command, writing user-facing output to `out`.
    fn run(&self, invocation: &Invocation, process: &Process, out: &mut dyn Write) -> Result<()>;
}

/// `sch log init [path] [--store-type <type>] [--store-config <value>...]`
pub fn log_init_spec() -> std::result::Result<CommandSpec, SpecError> {
    CommandSpec::builder("init")
        .description("Initialise a log in a directory")
        .arg(
            OptionSpec::string("path")
                .description("Directory holding the log (defaults to the current directory)")
                .default_with(|process| process.cwd().display().to_string())
                .build()?,
        )?
        .flag(
            OptionSpec::string("store-config")
                .description("Store driver setting, repeatable")
                .multiple()
                .optional()
                .build()?,
        )?
        .flag(
            OptionSpec::string("store-type")
                .short('t')
                .description("Store driver name")
                .optional()
                .build()?,
        )?
        .build()
}

/// The full command tree.
pub fn program() -> std::result::Result<ProgramSpec, SpecError> {
    let log = GroupSpec::builder("log")
        .description("Manage logs")
        .command(log_init_spec()?)?
        .build()?;

    ProgramSpec::builder("sch").group(log)?.build()
}

/// Handlers keyed by command path.
pub fn commands() -> std::result::Result<Registry<Box<dyn Command>>, RegistryError> {
    let log = Registry::builder()
        .entry("init", Box::new(LogInit) as Box<dyn Command>)?
        .build();

    Ok(Registry::builder().registry("log", log)?.build())
}

/// Reports the resolved invocation. Storage drivers are not bundled, so
/// nothing is written to disk.
#[derive(Debug)]
pub struct LogInit;

impl Command for LogInit {
    fn run(&self, invocation: &Invocation, process: &Process, out: &mut dyn Write) -> Result<()> {
        info!(cwd = %process.cwd().display(), "log init");
        serde_json::to_writer_pretty(&mut *out, invocation)?;
        writeln!(out)?;
        Ok(())
    }
}
