use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ok,
    CompressFailed,
    StageMkdirFailed,
    DecompressFailed,
    DigestFailed,
    Mismatch,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::CompressFailed => "compress_failed",
            Self::StageMkdirFailed => "stage_mkdir_failed",
            Self::DecompressFailed => "decompress_failed",
            Self::DigestFailed => "digest_failed",
            Self::Mismatch => "mismatch",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Outcome record for one Job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Status {
    pub source_path:   PathBuf,
    pub outcome:       Outcome,
    pub error_message: Option<String>,
    /// SHA-256 of the original, when verification got that far.
    pub digest:        Option<String>,
}

impl Status {
    pub fn ok(source_path: &Path, digest: String) -> Self {
        Self {
            source_path:   source_path.to_path_buf(),
            outcome:       Outcome::Ok,
            error_message: None,
            digest:        Some(digest),
        }
    }

    pub fn mismatch(source_path: &Path, original: String, candidate: &str) -> Self {
        Self {
            source_path:   source_path.to_path_buf(),
            outcome:       Outcome::Mismatch,
            error_message: Some(format!(
                "decompressed copy differs: expected {original}, got {candidate}"
            )),
            digest:        Some(original),
        }
    }

    pub fn failed(source_path: &Path, outcome: Outcome, message: impl fmt::Display) -> Self {
        Self {
            source_path: source_path.to_path_buf(),
            outcome,
            error_message: Some(message.to_string()),
            digest: None,
        }
    }

    pub fn is_ok(&self) -> bool { self.outcome == Outcome::Ok }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source_path.display(), self.outcome)?;
        if let Some(message) = &self.error_message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_tags() {
        assert_eq!(Outcome::Ok.to_string(), "ok");
        assert_eq!(Outcome::StageMkdirFailed.to_string(), "stage_mkdir_failed");
        assert_eq!(
            serde_json::to_string(&Outcome::DecompressFailed).unwrap(),
            "\"decompress_failed\""
        );
    }

    #[test]
    fn failed_status_line() {
        let status = Status::failed(
            Path::new("data/a.bin"),
            Outcome::CompressFailed,
            "permission denied",
        );
        assert!(!status.is_ok());
        assert_eq!(status.to_string(), "data/a.bin: compress_failed: permission denied");
    }

    #[test]
    fn mismatch_keeps_original_digest() {
        let status = Status::mismatch(Path::new("f"), "aa".into(), "bb");
        assert_eq!(status.outcome, Outcome::Mismatch);
        assert_eq!(status.digest.as_deref(), Some("aa"));
        assert!(status.error_message.unwrap().contains("bb"));
    }
}
