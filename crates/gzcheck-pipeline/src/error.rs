use std::io;
use std::path::PathBuf;

/// Orchestrator-level failures. Per-file failures are `Status` outcomes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input path does not exist: '{path}'")]
    MissingInput { path: PathBuf },

    #[error("input is neither a regular file nor a directory: '{path}'")]
    UnsupportedInput { path: PathBuf },

    #[error("failed to inspect input '{path}': {source}")]
    Inspect { path: PathBuf, source: io::Error },

    #[error("staging root already exists: '{path}'")]
    StagingExists { path: PathBuf },

    #[error("walk failed under '{root}': {source}")]
    Walk {
        root:   PathBuf,
        source: walkdir::Error,
    },

    #[error("failed to start worker pool: {0}")]
    Runtime(#[source] io::Error),

    #[error("failed to remove staging root '{path}': {source}")]
    Cleanup { path: PathBuf, source: io::Error },
}

impl Error {
    /// Stable tag for the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingInput { .. } => "missing_input",
            Self::UnsupportedInput { .. } => "unsupported_input",
            Self::Inspect { .. } => "inspect_failed",
            Self::StagingExists { .. } => "staging_exists",
            Self::Walk { .. } => "walk_failed",
            Self::Runtime(_) => "runtime_failed",
            Self::Cleanup { .. } => "cleanup_failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
