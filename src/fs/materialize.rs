//! Configuration materialization: copy a default template into place only
//! when the target is absent. Existing files are never touched, merged, or
//! diffed, so operator customizations survive every run.
use std::path::Path;

use crate::adapters::FileOps;
use crate::types::errors::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Materialized {
    AlreadyPresent,
    Copied,
}

/// Ensure `path` exists, copying `template` verbatim if it does not.
///
/// # Errors
///
/// Returns the copy error when the template is missing or the target cannot be written.
pub fn ensure_file(fs: &dyn FileOps, path: &Path, template: &Path) -> Result<Materialized> {
    if fs.exists(path) {
        return Ok(Materialized::AlreadyPresent);
    }
    fs.copy(template, path)?;
    Ok(Materialized::Copied)
}
