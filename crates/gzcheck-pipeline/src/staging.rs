use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{Error, Result};

/// Scratch directory holding decompressed copies for one run.
///
/// The directory itself is created lazily by the first job that stages a
/// file. It is removed by [`StagingRoot::cleanup`], or on drop if cleanup was
/// never called.
pub struct StagingRoot {
    path:     PathBuf,
    absolute: PathBuf,
    removed:  bool,
}

impl StagingRoot {
    /// Claim `path` for this run. Refuses a path that already exists so a
    /// directory this run did not create is never removed.
    pub fn claim(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        match std::fs::symlink_metadata(&path) {
            Ok(_) => return Err(Error::StagingExists { path }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(Error::Inspect { path, source }),
        }

        let absolute = std::path::absolute(&path).map_err(|source| Error::Inspect {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            path,
            absolute,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path { &self.path }

    pub(crate) fn absolute(&self) -> &Path { &self.absolute }

    /// Whether `path` lies at or below the staging root.
    pub fn contains(&self, path: &Path) -> bool { is_under(&self.absolute, path) }

    /// Remove the staging tree. A root that was never created is fine.
    pub fn cleanup(mut self) -> Result<()> {
        self.removed = true;
        remove_tree(&self.path).map_err(|source| Error::Cleanup {
            path: self.path.clone(),
            source,
        })
    }
}

impl Drop for StagingRoot {
    fn drop(&mut self) {
        if !self.removed {
            if let Err(e) = remove_tree(&self.path) {
                warn!(path = %self.path.display(), error = %e, "failed to remove staging root");
            }
        }
    }
}

pub(crate) fn is_under(absolute_root: &Path, path: &Path) -> bool {
    std::path::absolute(path).is_ok_and(|p| p.starts_with(absolute_root))
}

fn remove_tree(path: &Path) -> io::Result<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed staging root");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
