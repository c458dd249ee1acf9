//! External command execution
//!
//! Every delegated tool (composer, artisan, mysql) goes through the
//! [`CommandRunner`] trait so the pipeline can be exercised in tests without
//! spawning anything. The production implementation shells out via `sh -c`
//! and fully awaits each command before the pipeline moves on.

use crate::error::InstallError;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::process::Command;

/// Captured result of a query-style delegate.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
}

/// Boundary for invoking external commands.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `command` in `dir` with inherited stdio so the user sees live
    /// output. Returns the exit code; a non-zero exit is not an error here,
    /// callers decide whether it is fatal.
    async fn stream(&mut self, dir: &Path, command: &str) -> Result<i32>;

    /// Run `command` in `dir` capturing stdout, for delegates queried for
    /// their output rather than their side effects.
    async fn capture(&mut self, dir: &Path, command: &str) -> Result<CommandOutput>;
}

/// Production runner: `sh -c <command>`.
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    async fn stream(&mut self, dir: &Path, command: &str) -> Result<i32> {
        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(dir)
            .status()
            .await
            .with_context(|| format!("Failed to run '{command}'"))?;

        Ok(status.code().unwrap_or(-1))
    }

    async fn capture(&mut self, dir: &Path, command: &str) -> Result<CommandOutput> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(dir)
            .output()
            .await
            .with_context(|| format!("Failed to run '{command}'"))?;

        Ok(CommandOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// Run a foundational-stage command and turn a non-zero exit into
/// [`InstallError::CommandFailed`].
pub async fn run_fatal<R: CommandRunner>(runner: &mut R, dir: &Path, command: &str) -> Result<()> {
    let code = runner.stream(dir, command).await?;
    if code != 0 {
        return Err(InstallError::CommandFailed {
            command: command.to_string(),
            code,
        }
        .into());
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingRunner;
    use super::*;

    #[tokio::test]
    async fn test_run_fatal_accepts_zero_exit() {
        let mut runner = RecordingRunner::new();
        run_fatal(&mut runner, Path::new("."), "true").await.unwrap();
        assert_eq!(runner.commands, vec!["true"]);
    }

    #[tokio::test]
    async fn test_run_fatal_rejects_nonzero_exit() {
        let mut runner = RecordingRunner::new();
        runner.exit_code = 2;
        let err = run_fatal(&mut runner, Path::new("."), "composer install")
            .await
            .unwrap_err();
        let err = err.downcast::<InstallError>().unwrap();
        assert!(matches!(
            err,
            InstallError::CommandFailed { ref command, code: 2 } if command == "composer install"
        ));
    }
}
