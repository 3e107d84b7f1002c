//! Process execution boundary.
//!
//! Every platform operation is a single invocation of an external tool.
//! The [`CommandRunner`] trait is the seam between the deployer and the
//! operating system so that tests can script tool behaviour.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{DeployerError, DeployerResult};

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external programs to completion.
pub trait CommandRunner {
    /// Run `program` with `args`, capturing stdout and stderr.
    fn run(&self, program: &Path, args: &[String]) -> DeployerResult<CommandOutput>;

    /// Run `program` with the terminal's stdio attached and return its exit
    /// code once it finishes.
    fn stream(&self, program: &Path, args: &[String]) -> DeployerResult<Option<i32>>;
}

/// Runner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> DeployerResult<CommandOutput> {
        tracing::debug!(program = %program.display(), ?args, "Running external tool");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| DeployerError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(program = %program.display(), code = ?result.code, "External tool finished");

        Ok(result)
    }

    fn stream(&self, program: &Path, args: &[String]) -> DeployerResult<Option<i32>> {
        tracing::debug!(program = %program.display(), ?args, "Streaming external tool");

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| DeployerError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        Ok(status.code())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_stdout_and_exit_code() {
        let runner = SystemRunner::new();
        let output = runner
            .run(
                Path::new("sh"),
                &["-c".to_string(), "echo out; echo err >&2; exit 3".to_string()],
            )
            .unwrap();

        assert_eq!(output.code, Some(3));
        assert!(!output.success());
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[test]
    fn test_run_missing_program_is_spawn_error() {
        let runner = SystemRunner::new();
        let err = runner
            .run(Path::new("/nonexistent/olares-tool"), &[])
            .unwrap_err();
        assert!(matches!(err, DeployerError::Spawn { .. }));
    }

    #[test]
    fn test_stream_returns_exit_code() {
        let runner = SystemRunner::new();
        let code = runner
            .stream(Path::new("sh"), &["-c".to_string(), "exit 0".to_string()])
            .unwrap();
        assert_eq!(code, Some(0));
    }
}
