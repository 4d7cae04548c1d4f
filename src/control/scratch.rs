//! Per-run temporary directory.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::error::Result;

/// One OS temporary directory owned by a single pipeline run.
///
/// [`provision`](Self::provision) hands out fresh sub-paths without creating
/// them. The tree is removed by [`close`](Self::close), or on drop if the run
/// returns early. Removal errors are logged and never returned.
#[derive(Debug)]
pub struct ScratchDirectory {
    root: PathBuf,
    dir: Option<TempDir>,
    next: Cell<usize>,
}

impl ScratchDirectory {
    /// Create a new unique temporary directory.
    pub fn open() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("texproject-").tempdir()?;
        let root = dir.path().to_path_buf();
        debug!("Opened scratch directory {}", root.display());
        Ok(Self {
            root,
            dir: Some(dir),
            next: Cell::new(0),
        })
    }

    /// Root of the scratch tree.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// A fresh path inside the scratch tree. Not created on disk.
    pub fn provision(&self) -> PathBuf {
        let n = self.next.get();
        self.next.set(n + 1);
        self.root.join(format!("scratch-{n}"))
    }

    /// Recursively remove the scratch tree.
    pub fn close(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if let Some(dir) = self.dir.take() {
            match dir.close() {
                Ok(()) => debug!("Removed scratch directory {}", self.root.display()),
                Err(e) => warn!(
                    "Failed to remove scratch directory {}: {}",
                    self.root.display(),
                    e
                ),
            }
        }
    }
}

impl Drop for ScratchDirectory {
    fn drop(&mut self) {
        self.remove();
    }
}
