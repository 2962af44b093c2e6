use crate::types::errors::{Error, ErrorKind};
use crate::types::Invocation;

/// Replaces the running process image. Only the top-level driver calls this.
pub trait ProcessReplacer {
    /// Never returns on success; the returned value is the reason exec failed.
    fn replace(&self, inv: &Invocation) -> Error;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ExecReplacer;

#[cfg(unix)]
impl ProcessReplacer for ExecReplacer {
    fn replace(&self, inv: &Invocation) -> Error {
        use std::os::unix::process::CommandExt;
        let e = std::process::Command::new(&inv.program).args(&inv.args).exec();
        Error::new(ErrorKind::Spawn, format!("exec {}: {e}", inv.program.to_string_lossy()))
    }
}

#[cfg(not(unix))]
impl ProcessReplacer for ExecReplacer {
    fn replace(&self, inv: &Invocation) -> Error {
        Error::new(
            ErrorKind::Spawn,
            format!(
                "process replacement unsupported on this platform: {}",
                inv.program.to_string_lossy()
            ),
        )
    }
}
