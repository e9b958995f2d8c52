use crate::error::{Result, ValidationError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

/// Runs one external program at a time and captures its stdout.
pub struct CommandRunner {
    program: String,
    timeout: Option<Duration>,
    current_dir: Option<PathBuf>,
}

impl CommandRunner {
    pub fn new(program: impl Into<String>, timeout_secs: u64) -> Self {
        let timeout = if timeout_secs > 0 {
            Some(Duration::from_secs(timeout_secs))
        } else {
            None
        };

        Self {
            program: program.into(),
            timeout,
            current_dir: None,
        }
    }

    /// Run from `dir`. A relative program path such as `vendor/bin/drush`
    /// is resolved against `dir` too; bare names are still looked up on PATH.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        let program = Path::new(&self.program);
        if program.is_relative() && program.components().count() > 1 {
            self.program = dir.join(program).to_string_lossy().into_owned();
        }
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Printable form of an invocation, used in logs and errors
    pub fn describe(&self, args: &[&str]) -> String {
        let mut line = self.program.clone();
        for arg in args {
            line.push(' ');
            if arg.contains(char::is_whitespace) {
                line.push_str(&format!("\"{}\"", arg));
            } else {
                line.push_str(arg);
            }
        }
        line
    }

    /// Run to completion; a non-zero exit is an error
    pub async fn execute(&self, args: &[&str]) -> Result<String> {
        let command = self.describe(args);
        log::debug!("exec: {}", command);

        let mut cmd = Command::new(&self.program);
        cmd.args(args).kill_on_drop(true);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        let child = cmd.output();

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child).await.map_err(|_| {
                ValidationError::CommandTimeout {
                    command: command.clone(),
                    secs: limit.as_secs(),
                }
            })?,
            None => child.await,
        }
        .map_err(|e| ValidationError::CommandFailed {
            command: command.clone(),
            stderr: e.to_string(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            log::debug!("exit {}: {}", output.status, stderr.trim());
            return Err(ValidationError::CommandFailed {
                command,
                stderr: stderr.trim().to_string(),
            });
        }

        log::trace!("stdout: {}", stdout.trim());
        Ok(stdout)
    }
}
