//! Process execution utilities
//!
//! Runs external tools (such as Inkscape) with captured output.

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Result of a command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// Exit code of the command
    pub exit_code: i32,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandResult {
    /// Create from std::process::Output
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Turn a non-zero exit into a `CommandFailed` error
    pub fn check(self, program: &str) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::command_failed(program, self.exit_code, &self.stderr))
        }
    }
}

/// Run a command and capture output
pub fn run_command(program: &str, args: &[&str]) -> Result<CommandResult> {
    tracing::debug!(program, ?args, "running command");

    let output = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::command_not_found(program)
            } else {
                Error::process(format!("Failed to execute {}: {}", program, e)).with_source(e)
            }
        })?;

    Ok(CommandResult::from_output(output))
}

/// Get the path to a command
pub fn which_command(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}

/// Fail with `CommandNotFound` unless `program` can be located
pub fn require_command(program: &str) -> Result<PathBuf> {
    which_command(program).ok_or_else(|| Error::command_not_found(program))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_missing_command_is_reported() {
        let program = "droidtools-definitely-not-installed";
        assert!(which_command(program).is_none());

        let err = require_command(program).unwrap_err();
        assert_eq!(err.code, ErrorCode::CommandNotFound);

        let err = run_command(program, &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::CommandNotFound);
    }

    #[test]
    fn test_check_rejects_failure() {
        let result = CommandResult {
            success: false,
            exit_code: 3,
            stdout: String::new(),
            stderr: "export failed".to_string(),
        };
        let err = result.check("inkscape").unwrap_err();
        assert_eq!(err.code, ErrorCode::CommandFailed);
        assert!(err.message.contains("status 3"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_command_captures_stdout() {
        let result = run_command("sh", &["-c", "echo hello"]).unwrap();
        assert!(result.success);
        assert_eq!(result.stdout.trim(), "hello");
    }
}
