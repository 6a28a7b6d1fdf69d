//! Process execution for the external tools.
//!
//! Every invocation is blocking: it is spawned and waited on before the
//! caller continues.

use crate::domain::CoverageEnv;
use crate::error::{ToolError, ToolResult};
use std::ffi::OsString;
use std::fmt;
use std::process::{Command, Stdio};

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
    pub env: CoverageEnv,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: CoverageEnv::default(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, env: &CoverageEnv) -> Self {
        self.env = env.clone();
        self
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        for (key, value) in self.env.iter() {
            command.env(key, value);
        }
        command
    }
}

/// Renders as each token double-quoted and space separated
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.program)?;
        for arg in &self.args {
            write!(f, " \"{}\"", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Seam between the services and the operating system
pub trait CommandRunner {
    /// Run to completion and return stdout. Stderr is passed through.
    fn capture(&self, invocation: &Invocation) -> ToolResult<String>;

    /// Run to completion with all output passed through
    fn run(&self, invocation: &Invocation) -> ToolResult<()>;
}

/// Runs commands with `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn announce(invocation: &Invocation) {
        eprintln!("[dbg] running: {}", invocation);
        tracing::debug!(program = %invocation.program, args = invocation.args.len(), "Spawning");
    }

    fn spawn_error(invocation: &Invocation, source: std::io::Error) -> ToolError {
        ToolError::Spawn {
            program: invocation.program.clone(),
            source,
        }
    }

    fn check_status(invocation: &Invocation, status: std::process::ExitStatus) -> ToolResult<()> {
        if status.success() {
            return Ok(());
        }
        Err(ToolError::Status {
            command: invocation.to_string(),
            code: status.code(),
        })
    }
}

impl CommandRunner for SystemRunner {
    fn capture(&self, invocation: &Invocation) -> ToolResult<String> {
        Self::announce(invocation);

        let output = invocation
            .command()
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| Self::spawn_error(invocation, e))?;

        Self::check_status(invocation, output.status)?;

        String::from_utf8(output.stdout).map_err(|_| ToolError::InvalidUtf8 {
            program: invocation.program.clone(),
        })
    }

    fn run(&self, invocation: &Invocation) -> ToolResult<()> {
        Self::announce(invocation);

        let status = invocation
            .command()
            .status()
            .map_err(|e| Self::spawn_error(invocation, e))?;

        Self::check_status(invocation, status)
    }
}
