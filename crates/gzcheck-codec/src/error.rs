use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to open '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to create '{path}': {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("failed to compress '{path}': {source}")]
    Encode { path: PathBuf, source: io::Error },

    #[error("failed to decompress '{path}': {source}")]
    Decode { path: PathBuf, source: io::Error },
}

impl CodecError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Open { path, .. }
            | Self::Create { path, .. }
            | Self::Encode { path, .. }
            | Self::Decode { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
