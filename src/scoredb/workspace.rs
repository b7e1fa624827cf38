use crate::error::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// Scratch directory for render output.
///
/// The directory is removed when the handle drops, which covers normal
/// returns, errors and panics. [`Workspace::keep`] is the only way to make
/// it outlive the handle.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn acquire() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("scoredb-").tempdir()?;
        debug!(path = %dir.path().display(), "acquired workspace");
        Ok(Self { dir })
    }

    /// Acquire inside `parent` instead of the system temp directory.
    pub fn acquire_in<P: AsRef<Path>>(parent: P) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("scoredb-")
            .tempdir_in(parent)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Output base for a render: the tool appends `.pdf` and `.midi`.
    pub fn output_base(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Disable cleanup and return the directory's path.
    #[allow(deprecated)]
    pub fn keep(self) -> PathBuf {
        let path = self.dir.into_path();
        debug!(path = %path.display(), "keeping workspace");
        path
    }
}
