use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::{CommandOutput, Invocation};

/// Executes external collaborators. Blocks until the child exits; there is
/// no timeout.
pub trait CommandRunner: Send + Sync {
    /// Run with captured output. Used by capability checks.
    /// # Errors
    /// Returns an error when the program cannot be spawned.
    fn probe(&self, inv: &Invocation) -> Result<CommandOutput>;

    /// Run with inherited stdio so the operator sees progress and can answer
    /// collaborator prompts. Only the exit code is reported back.
    /// # Errors
    /// Returns an error when the program cannot be spawned.
    fn run(&self, inv: &Invocation) -> Result<CommandOutput>;
}

#[derive(Clone, Debug, Default)]
pub struct SystemRunner {
    cwd: Option<PathBuf>,
}

impl SystemRunner {
    #[must_use]
    pub fn in_dir(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
        }
    }

    fn command(&self, inv: &Invocation) -> Command {
        let mut cmd = Command::new(&inv.program);
        cmd.args(&inv.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

fn spawn_error(inv: &Invocation, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::Spawn, format!("{}: {e}", inv.program.to_string_lossy()))
}

impl CommandRunner for SystemRunner {
    fn probe(&self, inv: &Invocation) -> Result<CommandOutput> {
        let out = self
            .command(inv)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(inv, &e))?;
        Ok(CommandOutput {
            code: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }

    fn run(&self, inv: &Invocation) -> Result<CommandOutput> {
        log::debug!("exec: {inv}");
        let status = self
            .command(inv)
            .status()
            .map_err(|e| spawn_error(inv, &e))?;
        Ok(CommandOutput {
            code: status.code(),
            ..CommandOutput::default()
        })
    }
}
