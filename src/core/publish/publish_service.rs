// The publish step: run one external build/commit/push command after the
// export has landed on disk. A failure here is reported, never fatal.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by the external publish command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("Failed to start publish command: {0}")]
    Spawn(String),
    #[error("Publish command exited with status {code}")]
    NonZeroExit { code: i32 },
    #[error("Publish command was terminated by a signal")]
    Terminated,
}

/// A shell script plus the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishCommand {
    pub script: String,
    pub working_dir: PathBuf,
}

impl PublishCommand {
    /// A leading `~` in `working_dir` is replaced with `home` when one is given.
    pub fn new(script: impl Into<String>, working_dir: &str, home: Option<&Path>) -> Self {
        let working_dir = match (working_dir.strip_prefix('~'), home) {
            (Some(rest), Some(home)) => home.join(rest.trim_start_matches('/')),
            _ => PathBuf::from(working_dir),
        };

        Self {
            script: script.into(),
            working_dir,
        }
    }
}

/// Exit status of a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// What a successful publish looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub working_dir: PathBuf,
}

/// Runs an external command to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &PublishCommand) -> Result<CommandStatus, PublishError>;
}

pub struct PublishService<R: CommandRunner> {
    runner: R,
    command: PublishCommand,
}

impl<R: CommandRunner> PublishService<R> {
    pub fn new(runner: R, command: PublishCommand) -> Self {
        Self { runner, command }
    }

    /// Runs the command and turns its exit status into a typed outcome.
    pub async fn publish(&self) -> Result<PublishReport, PublishError> {
        tracing::info!(
            working_dir = %self.command.working_dir.display(),
            "Running publish command"
        );

        let status = self.runner.run(&self.command).await?;
        if status.success() {
            return Ok(PublishReport {
                working_dir: self.command.working_dir.clone(),
            });
        }

        match status.code {
            Some(code) => Err(PublishError::NonZeroExit { code }),
            None => Err(PublishError::Terminated),
        }
    }
}
