use std::path::Path;

use crate::types::errors::Result;

/// Filesystem operations on managed artifacts.
pub trait FileOps: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Copy `from` to `to` verbatim, creating parent directories of `to`.
    /// # Errors
    /// Returns an error when the source cannot be read or the destination cannot be written.
    fn copy(&self, from: &Path, to: &Path) -> Result<()>;

    /// Create `path` if missing and bump its mtime.
    /// # Errors
    /// Returns an error of kind `Permission` when the file or its directory is not writable.
    fn touch(&self, path: &Path) -> Result<()>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StdFileOps;

impl FileOps for StdFileOps {
    fn exists(&self, path: &Path) -> bool {
        crate::fs::exists(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        crate::fs::copy_verbatim(from, to)?;
        Ok(())
    }

    fn touch(&self, path: &Path) -> Result<()> {
        crate::fs::touch(path)?;
        Ok(())
    }
}
