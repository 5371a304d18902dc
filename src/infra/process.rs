//! External process execution
//!
//! Runs a command to completion with a controlled working directory and an
//! environment built from the parent's, with caller-supplied variables taking
//! precedence. The child inherits stdout and stderr; stdin is closed.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::ProcessError;

/// Callback invoked with the resolved command line right before it is spawned
pub type CommandObserver = Box<dyn Fn(&[String]) + Send + Sync>;

/// A command to run, with its working directory and environment overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Program followed by its arguments
    pub command: Vec<String>,
    /// Working directory (current directory when `None`)
    pub working_dir: Option<PathBuf>,
    /// Variables overriding the inherited environment
    pub env: BTreeMap<String, String>,
}

impl Invocation {
    /// Create an invocation from a program and its arguments
    pub fn new<I>(command: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            command: command.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the working directory
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Add an environment variable
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// The command line joined with spaces, for messages
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

/// Something that can execute an [`Invocation`]
///
/// The build driver is generic over this so tests can record invocations
/// instead of spawning a real toolchain.
pub trait CommandRunner {
    /// Run the invocation to completion
    fn run(&self, invocation: &Invocation) -> Result<(), ProcessError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<(), ProcessError> {
        (**self).run(invocation)
    }
}

/// Runs invocations as real child processes
pub struct ProcessRunner {
    observer: CommandObserver,
}

impl ProcessRunner {
    /// Create a runner that logs each command line through `tracing`
    pub fn new() -> Self {
        Self::with_observer(Box::new(|command: &[String]| {
            tracing::info!("{}", command.join(" "));
        }))
    }

    /// Create a runner that reports command lines to `observer`
    pub fn with_observer(observer: CommandObserver) -> Self {
        Self { observer }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProcessRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessRunner").finish_non_exhaustive()
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), ProcessError> {
        let (program, args) = invocation
            .command
            .split_first()
            .ok_or(ProcessError::EmptyCommand)?;

        let executable = resolve_executable(program)?;

        let mut resolved = vec![executable.display().to_string()];
        resolved.extend(args.iter().cloned());
        (self.observer)(&resolved);

        let working_dir = match &invocation.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let environment = merge_env(std::env::vars_os(), &invocation.env);

        let status = Command::new(executable)
            .args(args)
            .current_dir(working_dir)
            .env_clear()
            .envs(environment)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        if !status.success() {
            return Err(ProcessError::CommandFailed {
                command: invocation.command_line(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

/// Resolve a program name to an executable path
///
/// Bare names go through a PATH lookup. Paths with more than one component
/// are used as given, relative ones resolved against the caller's current
/// directory rather than the child's working directory.
pub fn resolve_executable(program: &str) -> Result<PathBuf, ProcessError> {
    let path = Path::new(program);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    if path.components().count() > 1 {
        return Ok(std::env::current_dir()?.join(path));
    }

    which::which(program).map_err(|e| ProcessError::ExecutableNotFound {
        name: program.to_string(),
        error: e.to_string(),
    })
}

/// Overlay `overrides` on `base`
///
/// Entries of `base` whose key is overridden are dropped before the
/// overrides are appended, so every overridden key appears exactly once.
pub fn merge_env<I>(base: I, overrides: &BTreeMap<String, String>) -> Vec<(OsString, OsString)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut merged: Vec<(OsString, OsString)> = base
        .into_iter()
        .filter(|(key, _)| key.to_str().map_or(true, |key| !overrides.contains_key(key)))
        .collect();

    merged.extend(
        overrides
            .iter()
            .map(|(key, value)| (OsString::from(key), OsString::from(value))),
    );
    merged
}
