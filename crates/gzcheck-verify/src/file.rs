use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use tracing::debug;

use crate::{Hasher, Result, Sha256Hasher, VerificationError, VerifiedReader};

/// Stream a file through SHA-256 and return its lowercase hex digest.
pub fn digest_file(path: impl AsRef<Path>) -> Result<String> {
    digest_file_with(path, Sha256Hasher::new())
}

/// Stream a file through `hasher` and return the lowercase hex digest.
pub fn digest_file_with<H: Hasher>(path: impl AsRef<Path>, hasher: H) -> Result<String> {
    let path = path.as_ref();
    let digest_err = |source: io::Error| VerificationError::Digest {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(digest_err)?;
    let mut reader = VerifiedReader::new(BufReader::new(file), hasher);
    io::copy(&mut reader, &mut io::sink()).map_err(digest_err)?;

    debug!(path = %path.display(), bytes = reader.bytes_read(), "digested");
    Ok(reader.finalize_hex())
}

/// Digests of an original file and a candidate copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comparison {
    pub original:  String,
    pub candidate: String,
}

impl Comparison {
    pub fn matches(&self) -> bool { self.original == self.candidate }
}

/// Digest both files. Fails on the first file that cannot be read.
pub fn compare(original: impl AsRef<Path>, candidate: impl AsRef<Path>) -> Result<Comparison> {
    let original = digest_file(original)?;
    let candidate = digest_file(candidate)?;
    Ok(Comparison {
        original,
        candidate,
    })
}

/// `true` iff both files digest successfully to the same value.
pub fn verify(original: impl AsRef<Path>, candidate: impl AsRef<Path>) -> Result<bool> {
    Ok(compare(original, candidate)?.matches())
}
