use std::path::{Path, PathBuf};

pub const GZIP_SUFFIX: &str = ".gz";

/// One file's worth of work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub source_path:     PathBuf,
    pub relative_path:   PathBuf,
    pub compressed_path: PathBuf,
    pub staged_path:     PathBuf,
}

impl Job {
    pub fn new(
        source_path: impl Into<PathBuf>,
        relative_path: impl Into<PathBuf>,
        staging_root: &Path,
    ) -> Self {
        let source_path = source_path.into();
        let relative_path = relative_path.into();
        let compressed_path = compressed_path_for(&source_path);
        let staged_path = staging_root.join(&relative_path);

        Self {
            source_path,
            relative_path,
            compressed_path,
            staged_path,
        }
    }
}

/// `path` with `.gz` appended to the full file name.
pub fn compressed_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(GZIP_SUFFIX);
    PathBuf::from(name)
}

/// Whether the file name ends in `.gz`.
pub fn is_compressed_name(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(GZIP_SUFFIX))
}
