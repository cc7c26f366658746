//! The per-file compress, stage, decompress, verify sequence.

use std::fmt;

use tracing::{debug, warn};

use crate::job::Job;
use crate::status::{Outcome, Status};

/// Run all four steps for `job`. The first failing step decides the outcome.
///
/// Neither `compressed_path` nor `staged_path` is removed here, even on
/// failure.
pub fn run_job(job: &Job) -> Status {
    debug!(source = %job.source_path.display(), "compressing");
    if let Err(err) = gzcheck_codec::compress(&job.source_path, &job.compressed_path) {
        return fail(job, Outcome::CompressFailed, err);
    }
    decompress_and_verify(job)
}

/// Steps two to four against an existing `compressed_path`.
pub fn decompress_and_verify(job: &Job) -> Status {
    if let Some(parent) = job.staged_path.parent() {
        if let Err(err) = std::fs::create_dir_all(parent) {
            return fail(
                job,
                Outcome::StageMkdirFailed,
                format_args!("failed to create '{}': {err}", parent.display()),
            );
        }
    }

    debug!(source = %job.compressed_path.display(), staged = %job.staged_path.display(), "staging");
    if let Err(err) = gzcheck_codec::decompress(&job.compressed_path, &job.staged_path) {
        return fail(job, Outcome::DecompressFailed, err);
    }

    match gzcheck_verify::compare(&job.source_path, &job.staged_path) {
        Ok(cmp) if cmp.matches() => {
            debug!(source = %job.source_path.display(), digest = %cmp.original, "verified");
            Status::ok(&job.source_path, cmp.original)
        }
        Ok(cmp) => {
            warn!(source = %job.source_path.display(), "digest mismatch");
            Status::mismatch(&job.source_path, cmp.original, &cmp.candidate)
        }
        Err(err) => fail(job, Outcome::DigestFailed, err),
    }
}

fn fail(job: &Job, outcome: Outcome, err: impl fmt::Display) -> Status {
    warn!(source = %job.source_path.display(), %outcome, error = %err, "job failed");
    Status::failed(&job.source_path, outcome, err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn job_in(dir: &Path, name: &str, data: &[u8]) -> Job {
        let source = dir.join(name);
        std::fs::write(&source, data).unwrap();
        Job::new(source, name, &dir.join("staging"))
    }

    #[test]
    fn ok_keeps_artifact_and_records_digest() {
        let dir = tempdir().unwrap();
        let job = job_in(dir.path(), "input", b"hello, world\n");

        let status = run_job(&job);

        assert_eq!(status.outcome, Outcome::Ok, "{status}");
        assert!(job.compressed_path.exists());
        assert_eq!(std::fs::read(&job.staged_path).unwrap(), b"hello, world\n");
        assert_eq!(
            status.digest.as_deref(),
            Some("853ff93762a06ddbf722c4ebe9ddd66d8f63ddaea97f521c3ecc20da7c976020")
        );
    }

    #[test]
    fn empty_file_is_ok() {
        let dir = tempdir().unwrap();
        let job = job_in(dir.path(), "empty", b"");

        let status = run_job(&job);

        assert!(status.is_ok(), "{status}");
        assert!(std::fs::metadata(&job.compressed_path).unwrap().len() > 0);
    }

    #[test]
    fn missing_source_is_compress_failed() {
        let dir = tempdir().unwrap();
        let job = Job::new(dir.path().join("gone"), "gone", &dir.path().join("staging"));

        let status = run_job(&job);

        assert_eq!(status.outcome, Outcome::CompressFailed);
        assert!(status.error_message.is_some());
        assert!(!job.staged_path.exists());
    }

    #[test]
    fn directory_source_is_compress_failed() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("not-a-file");
        std::fs::create_dir(&source).unwrap();
        let job = Job::new(&source, "not-a-file", &dir.path().join("staging"));

        let status = run_job(&job);

        assert_eq!(status.outcome, Outcome::CompressFailed, "{status}");
        assert!(status.digest.is_none());
        assert!(!job.staged_path.exists());
    }

    #[test]
    fn corrupt_artifact_is_decompress_failed() {
        let dir = tempdir().unwrap();
        let job = job_in(dir.path(), "input", b"payload");
        std::fs::write(&job.compressed_path, b"not a gzip stream at all").unwrap();

        let status = decompress_and_verify(&job);

        assert_eq!(status.outcome, Outcome::DecompressFailed);
    }

    #[test]
    fn foreign_artifact_is_mismatch() {
        let dir = tempdir().unwrap();
        let job = job_in(dir.path(), "input", b"original bytes");
        let other = dir.path().join("other");
        std::fs::write(&other, b"something else").unwrap();
        gzcheck_codec::compress(&other, &job.compressed_path).unwrap();

        let status = decompress_and_verify(&job);

        assert_eq!(status.outcome, Outcome::Mismatch);
        assert!(status.digest.is_some());
    }

    #[test]
    fn staging_parent_blocked_is_stage_mkdir_failed() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("x.txt");
        std::fs::write(&source, b"x").unwrap();
        let blocker = dir.path().join("staging");
        std::fs::write(&blocker, b"a file where a directory should be").unwrap();
        let job = Job::new(&source, "a/x.txt", &blocker);

        let status = run_job(&job);

        assert_eq!(status.outcome, Outcome::StageMkdirFailed);
        assert!(job.compressed_path.exists());
    }

    #[test]
    fn vanished_original_is_digest_failed() {
        let dir = tempdir().unwrap();
        let job = job_in(dir.path(), "input", b"short-lived");
        gzcheck_codec::compress(&job.source_path, &job.compressed_path).unwrap();
        std::fs::remove_file(&job.source_path).unwrap();

        let status = decompress_and_verify(&job);

        assert_eq!(status.outcome, Outcome::DigestFailed);
        assert!(status.error_message.unwrap().contains("input"));
    }
}
