use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::adapters::CommandRunner;
use crate::types::Invocation;

/// Locate an executable named `bin` on `search_path`.
pub fn which_on_path(bin: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let path = search_path?;
    for dir in env::split_paths(path) {
        let cand = dir.join(bin);
        if cand.is_file() && is_executable(&cand) {
            return Some(cand);
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    if let Ok(md) = std::fs::metadata(path) {
        let mode = md.permissions().mode();
        return (mode & 0o111) != 0;
    }
    false
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}

/// Exit status of `service <name> status`. A probe that cannot run counts as not running.
pub fn daemon_running(runner: &dyn CommandRunner, service: &str) -> bool {
    let inv = Invocation::new("service").args([service, "status"]);
    runner.probe(&inv).is_ok_and(|out| out.success())
}

/// Group list of the *current process* (`id -Gn`), not the account database,
/// so a membership added during this session does not count until re-exec.
pub fn in_group(runner: &dyn CommandRunner, group: &str) -> bool {
    match runner.probe(&Invocation::new("id").arg("-Gn")) {
        Ok(out) if out.success() => out.stdout.split_whitespace().any(|g| g == group),
        _ => false,
    }
}

/// `<proxy> status` must succeed and its output must not contain the
/// `not_running` sentinel. The sentinel match is the only output the crate
/// interprets; swap this function out if the tool grows a structured status.
pub fn proxy_running(runner: &dyn CommandRunner, program: &str, not_running: &str) -> bool {
    match runner.probe(&Invocation::new(program).arg("status")) {
        Ok(out) => {
            out.success() && !out.stdout.contains(not_running) && !out.stderr.contains(not_running)
        }
        Err(_) => false,
    }
}

/// Connectivity probe through the application's data layer. Any failure
/// means "absent", never an error.
pub fn database_reachable(runner: &dyn CommandRunner, probe: &Invocation) -> bool {
    runner.probe(probe).is_ok_and(|out| out.success())
}
