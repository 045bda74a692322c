use async_trait::async_trait;
use tokio::process::Command;

use crate::core::publish::{CommandRunner, CommandStatus, PublishCommand, PublishError};

/// Runs publish scripts through `sh -c`, passing stdio straight through so
/// the build and git output shows up in our terminal.
#[derive(Debug, Clone)]
pub struct ShellCommandRunner {
    shell: String,
}

impl ShellCommandRunner {
    pub fn new() -> Self {
        Self::with_shell("sh")
    }

    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Default for ShellCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ShellCommandRunner {
    async fn run(&self, command: &PublishCommand) -> Result<CommandStatus, PublishError> {
        tracing::debug!(shell = %self.shell, script = %command.script, "Spawning publish command");

        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(&command.script)
            .current_dir(&command.working_dir)
            .status()
            .await
            .map_err(|e| {
                PublishError::Spawn(format!(
                    "{} in {}: {}",
                    self.shell,
                    command.working_dir.display(),
                    e
                ))
            })?;

        Ok(CommandStatus {
            code: status.code(),
        })
    }
}
