use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::job::{Job, is_compressed_name};
use crate::staging::{StagingRoot, is_under};
use crate::{Error, Result};

/// What the input path turned out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    RegularFile,
    Directory,
    AlreadyCompressed,
    Missing,
    Other,
}

/// Classify `path` by `stat` (following symlinks) and the `.gz` suffix.
pub fn classify(path: &Path) -> Result<InputKind> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(InputKind::Missing),
        Err(source) => {
            return Err(Error::Inspect {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let kind = if metadata.is_dir() {
        InputKind::Directory
    } else if metadata.is_file() && is_compressed_name(path) {
        InputKind::AlreadyCompressed
    } else if metadata.is_file() {
        InputKind::RegularFile
    } else {
        InputKind::Other
    };
    Ok(kind)
}

enum Source {
    Single(Option<Job>),
    Tree(walkdir::IntoIter),
    Done,
}

/// Enumerates the Jobs for one input.
///
/// A walk error is yielded once and ends the iteration.
pub struct Walker {
    root:             PathBuf,
    staging_root:     PathBuf,
    staging_absolute: PathBuf,
    source:           Source,
}

impl Walker {
    /// `kind` must be `RegularFile` or `Directory`; anything else yields
    /// nothing.
    pub fn new(root: impl Into<PathBuf>, kind: InputKind, staging: &StagingRoot) -> Self {
        let root = root.into();

        let source = match kind {
            InputKind::RegularFile => {
                let relative = root
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| root.clone());
                Source::Single(Some(Job::new(root.clone(), relative, staging.path())))
            }
            InputKind::Directory => {
                Source::Tree(WalkDir::new(&root).follow_links(false).sort_by_file_name().into_iter())
            }
            _ => Source::Done,
        };

        Self {
            root,
            staging_root: staging.path().to_path_buf(),
            staging_absolute: staging.absolute().to_path_buf(),
            source,
        }
    }
}

impl Iterator for Walker {
    type Item = Result<Job>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match &mut self.source {
                Source::Single(job) => {
                    let job = job.take();
                    self.source = Source::Done;
                    return job.map(Ok);
                }
                Source::Done => return None,
                Source::Tree(iter) => match iter.next()? {
                    Ok(entry) => entry,
                    Err(source) => {
                        self.source = Source::Done;
                        return Some(Err(Error::Walk {
                            root: self.root.clone(),
                            source,
                        }));
                    }
                },
            };

            let path = entry.path();
            if entry.file_type().is_dir() {
                if entry.depth() > 0 && is_under(&self.staging_absolute, path) {
                    debug!(path = %path.display(), "pruning staging root from walk");
                    if let Source::Tree(iter) = &mut self.source {
                        iter.skip_current_dir();
                    }
                }
                continue;
            }
            if !entry.file_type().is_file() {
                continue;
            }
            if is_compressed_name(path) {
                debug!(path = %path.display(), "skipping compressed file");
                continue;
            }

            let relative = match path.strip_prefix(&self.root) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => PathBuf::from(entry.file_name()),
            };
            return Some(Ok(Job::new(path, relative, &self.staging_root)));
        }
    }
}
