use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::status::Status;

/// Default staging directory, relative to the working directory.
pub const DEFAULT_STAGING_DIR: &str = "decompressed";

/// Upper bound on the default worker count.
pub const MAX_DEFAULT_WORKERS: usize = 8;

pub type StatusCallback = Arc<dyn Fn(&Status) + Send + Sync>;

#[derive(Clone)]
pub struct RunOptions {
    pub input:        PathBuf,
    pub staging_root: PathBuf,
    pub workers:      usize,
    pub on_status:    Option<StatusCallback>,
}

impl RunOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input:        input.into(),
            staging_root: PathBuf::from(DEFAULT_STAGING_DIR),
            workers:      default_workers(),
            on_status:    None,
        }
    }

    pub fn staging_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.staging_root = path.into();
        self
    }

    /// Worker pool width. Zero is raised to one.
    pub fn workers(mut self, n: usize) -> Self {
        self.workers = n.max(1);
        self
    }

    /// Called once per Status, from the single collector.
    pub fn on_status(mut self, callback: StatusCallback) -> Self {
        self.on_status = Some(callback);
        self
    }
}

/// `min(available CPUs, 8)`.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .min(MAX_DEFAULT_WORKERS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Outcome;
    use std::path::Path;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn defaults() {
        let options = RunOptions::new("data");
        assert_eq!(options.input, PathBuf::from("data"));
        assert_eq!(options.staging_root, PathBuf::from("decompressed"));
        assert!((1..=MAX_DEFAULT_WORKERS).contains(&options.workers));
        assert!(options.on_status.is_none());
    }

    #[test]
    fn builder_pattern() {
        let options = RunOptions::new("data").staging_root("/tmp/stage").workers(0);
        assert_eq!(options.staging_root, PathBuf::from("/tmp/stage"));
        assert_eq!(options.workers, 1);

        let options = options.workers(32);
        assert_eq!(options.workers, 32);
    }

    #[test]
    fn status_callback() {
        let counter = Arc::new(AtomicU64::new(0));
        let counter_clone = counter.clone();

        let options = RunOptions::new("data").on_status(Arc::new(move |_: &Status| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        }));

        let status = Status::failed(Path::new("x"), Outcome::CompressFailed, "boom");
        (options.on_status.as_ref().unwrap())(&status);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
