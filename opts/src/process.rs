//! The process context handed to default-value functions and command
//! handlers.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Snapshot of the invoking process: arguments, working directory and
/// environment.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use sch_cli_opts::Process;
///
/// let env = BTreeMap::from([("HOME".to_string(), "/home/me".to_string())]);
/// let process = Process::new(vec!["log".into(), "init".into()], "/work", env);
///
/// assert_eq!(process.argv(), ["log", "init"]);
/// assert_eq!(process.cwd().to_str(), Some("/work"));
/// assert_eq!(process.env("HOME"), Some("/home/me"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Process {
    argv: Vec<String>,
    cwd: PathBuf,
    env: BTreeMap<String, String>,
}

impl Process {
    /// Creates a process context from explicit parts.
    pub fn new(argv: Vec<String>, cwd: impl Into<PathBuf>, env: BTreeMap<String, String>) -> Self {
        Self {
            argv,
            cwd: cwd.into(),
            env,
        }
    }

    /// Captures the current process, with the program name stripped from
    /// `argv`. Non-UTF-8 arguments and variables are converted lossily.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn from_env() -> std::io::Result<Self> {
        let argv = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        let env = std::env::vars_os()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect();

        Ok(Self {
            argv,
            cwd: std::env::current_dir()?,
            env,
        })
    }

    /// Replaces the argument vector.
    pub fn with_argv(mut self, argv: Vec<String>) -> Self {
        self.argv = argv;
        self
    }

    /// Arguments, program name excluded.
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Looks up an environment variable.
    pub fn env(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// All environment variables.
    pub fn env_vars(&self) -> &BTreeMap<String, String> {
        &self.env
    }
}
