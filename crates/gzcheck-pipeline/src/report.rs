use std::path::PathBuf;

use serde::Serialize;

use crate::status::Status;

/// Sealed result of one run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunReport {
    pub statuses:      Vec<Status>,
    /// Jobs handed to the pool. Any not matched by a Status count as failed.
    pub dispatched:    usize,
    /// Set when the input itself was already compressed and nothing ran.
    pub skipped:       Option<PathBuf>,
    pub walk_error:    Option<String>,
    /// Workers or the collector that terminated abnormally.
    pub pool_errors:   Vec<String>,
    pub cleanup_error: Option<String>,
}

impl RunReport {
    pub fn new(statuses: Vec<Status>) -> Self {
        Self {
            dispatched: statuses.len(),
            statuses,
            ..Self::default()
        }
    }

    pub fn skipped(path: impl Into<PathBuf>) -> Self {
        Self {
            skipped: Some(path.into()),
            ..Self::default()
        }
    }

    /// Dispatched Jobs whose Status never reached the collector.
    pub fn lost(&self) -> usize { self.dispatched.saturating_sub(self.statuses.len()) }

    pub fn processed(&self) -> usize { self.statuses.len() + self.lost() }

    pub fn successful(&self) -> usize { self.statuses.iter().filter(|s| s.is_ok()).count() }

    pub fn failed(&self) -> usize { self.processed() - self.successful() }

    pub fn failures(&self) -> impl Iterator<Item = &Status> { self.statuses.iter().filter(|s| !s.is_ok()) }

    /// Every dispatched Job reported Ok, the walk finished and the pool shut
    /// down cleanly. Cleanup problems do not count.
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.walk_error.is_none() && self.pool_errors.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Processed {} files: {} successful, {} failed",
            self.processed(),
            self.successful(),
            self.failed()
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&JsonReport {
            processed:  self.processed(),
            successful: self.successful(),
            failed:     self.failed(),
            success:    self.is_success(),
            report:     self,
        })
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    processed:  usize,
    successful: usize,
    failed:     usize,
    success:    bool,
    #[serde(flatten)]
    report:     &'a RunReport,
}
