//! Plain filesystem primitives for managed artifacts.
//!
//! These never change permissions themselves. Relaxing permissions needs
//! privilege the run does not hold, so that remediation is done through
//! external commands by the step runner.
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use rustix::fs::{futimens, Timespec, Timestamps, UTIME_NOW};

#[must_use]
pub fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Create `path` if absent and set its access and modification times to now.
///
/// Both times must be `UTIME_NOW`: only that form is allowed with write
/// access alone. Any explicit or omitted time needs ownership, and a file
/// created by the permission fallback belongs to root.
///
/// # Errors
///
/// Propagates the underlying open error, including `PermissionDenied`.
pub fn touch(path: &Path) -> io::Result<()> {
    let f = OpenOptions::new().create(true).append(true).open(path)?;
    let now = Timespec {
        tv_sec: 0,
        tv_nsec: UTIME_NOW,
    };
    let times = Timestamps {
        last_access: now,
        last_modification: now,
    };
    futimens(&f, &times)?;
    Ok(())
}

/// Copy bytes from `from` to `to`, creating the destination's parent directories.
///
/// # Errors
///
/// Returns an IO error if the source cannot be read or the destination written.
pub fn copy_verbatim(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::copy(from, to).map(|_| ())
}
