mod config;
mod error;
mod logging;
mod program;

use std::path::PathBuf;

use clap::Parser as _;
use sch_cli_opts::{Parser, Process};
use tracing::debug;

use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::logging::LogFormat;

const CONFIG_ENV: &str = "SCH_CONFIG";

#[derive(Debug, clap::Parser)]
#[command(name = "sch", version)]
#[command(about = "Parse and run sch commands")]
struct Cli {
    /// Log level or filter directive (overrides SCH_LOG_LEVEL and RUST_LOG).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
    /// Log output format (overrides SCH_LOG_FORMAT).
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,
    /// YAML config file (defaults to SCH_CONFIG when set).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Write the effective configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    save_config: Option<PathBuf>,
    /// Command path followed by its arguments and flags, e.g. `log init --store-type gdrive`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let process = Process::from_env()?.with_argv(cli.tokens.clone());

    let config_path = cli
        .config
        .clone()
        .or_else(|| process.env(CONFIG_ENV).map(PathBuf::from));
    let mut config = match &config_path {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    let settings = logging::resolve(cli.log_level.as_deref(), cli.log_format, &config.log, &process)?;

    if let Some(path) = &cli.save_config {
        config.log.level = Some(settings.filter);
        config.log.format = Some(settings.format);
        config.save(path)?;
        return Ok(());
    }

    logging::init(&settings)?;
    debug!(config = ?config_path, filter = %settings.filter, format = %settings.format, "logging initialised");

    let parser = Parser::new(program::program()?)?;
    let invocation = parser.parse(&cli.tokens, &process)?.into_result()?;

    let commands = program::commands()?;
    let path = invocation.path().join(" ");
    let command = commands
        .find(invocation.path())
        .ok_or_else(|| CliError::NoHandler(path.clone()))?;

    debug!(command = %path, "dispatching");
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    command.run(&invocation, &process, &mut out)
}
