use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;

/// Why a single external invocation did not succeed. Always recoverable.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("{program} command not found")]
    NotFound { program: String },

    #[error("command '{command}' {}", describe_status(.status))]
    Exited {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("command '{command}' could not be started: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("returned non-zero exit status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// Runs the external extension manager with a given argument vector.
pub trait CommandRunner {
    fn run(&mut self, args: &[String]) -> Result<(), RunError>;
}

/// Blocking invocations of the `jupyter` front-end.
#[derive(Debug, Clone)]
pub struct JupyterCli {
    program: PathBuf,
}

impl JupyterCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command_line(&self, args: &[String]) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(args.iter().cloned());
        parts.join(" ")
    }
}

impl CommandRunner for JupyterCli {
    fn run(&mut self, args: &[String]) -> Result<(), RunError> {
        let command = self.command_line(args);
        tracing::debug!("running {command}");

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| {
                tracing::warn!("{command}: {source}");
                if source.kind() == io::ErrorKind::NotFound {
                    RunError::NotFound {
                        program: self.program.display().to_string(),
                    }
                } else {
                    RunError::Spawn {
                        command: command.clone(),
                        source,
                    }
                }
            })?;

        if output.status.success() {
            tracing::info!("{command}: ok");
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::warn!("{command}: {} ({stderr})", output.status);
        Err(RunError::Exited {
            command,
            status: output.status.code(),
            stderr,
        })
    }
}
