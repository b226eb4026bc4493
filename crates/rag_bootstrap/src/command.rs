//! Launching external commands, either to completion or as a background
//! child the sequencer keeps a handle to.

use crate::BootstrapError;
use async_trait::async_trait;
use std::process::ExitStatus;
use tokio::process::Command;

/// A program plus its arguments, parsed from a single command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split a whitespace-separated command line. Quoting is not supported;
    /// commands that need shell features should be wrapped in a script.
    pub fn parse(line: &str) -> Result<Self, BootstrapError> {
        let mut parts = line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| BootstrapError::Config("empty command line".into()))?
            .to_string();
        Ok(Self {
            program,
            args: parts.map(str::to_string).collect(),
        })
    }

    fn build(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// A spawned background process the sequencer still owns.
#[async_trait]
pub trait ChildHandle: Send + 'static {
    /// Wait for the process to exit. Cancel safe.
    async fn wait(&mut self) -> Result<ExitStatus, BootstrapError>;
    /// Terminate the process.
    async fn kill(&mut self) -> Result<(), BootstrapError>;
}

/// Seam between the sequencer and the operating system, so tests can record
/// launches instead of forking.
#[async_trait]
pub trait ProcessRunner: Send + Sync + 'static {
    /// Run `spec` in the foreground and report its exit status.
    async fn run(&self, spec: &CommandSpec) -> Result<ExitStatus, BootstrapError>;
    /// Start `spec` without waiting for it to exit.
    async fn spawn(&self, spec: &CommandSpec) -> Result<Box<dyn ChildHandle>, BootstrapError>;
}

/// Real runner over `tokio::process`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioProcessRunner;

struct TokioChild {
    child: tokio::process::Child,
}

#[async_trait]
impl ChildHandle for TokioChild {
    async fn wait(&mut self) -> Result<ExitStatus, BootstrapError> {
        Ok(self.child.wait().await?)
    }

    async fn kill(&mut self) -> Result<(), BootstrapError> {
        Ok(self.child.kill().await?)
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<ExitStatus, BootstrapError> {
        let mut cmd = spec.build();
        let status = cmd.status().await.map_err(|source| BootstrapError::Spawn {
            program: spec.program.clone(),
            source,
        })?;
        Ok(status)
    }

    async fn spawn(&self, spec: &CommandSpec) -> Result<Box<dyn ChildHandle>, BootstrapError> {
        let child = spec
            .build()
            .spawn()
            .map_err(|source| BootstrapError::Spawn {
                program: spec.program.clone(),
                source,
            })?;
        Ok(Box::new(TokioChild { child }))
    }
}
