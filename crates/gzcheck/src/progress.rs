use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use gzcheck_pipeline::{Status, StatusCallback};
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

const SPINNER_STYLE: &str = "{spinner:.blue} [{elapsed_precise}] {pos} files checked, {msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

static SPINNER_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(SPINNER_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK))
});

/// Spinner counting finished files. Draws nothing when stderr is not a
/// terminal.
#[derive(Clone)]
pub struct FileProgress {
    pb: ProgressBar,
}

impl FileProgress {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self {
                pb: ProgressBar::hidden(),
            };
        }

        let pb = ProgressBar::new_spinner();
        let pb = match SPINNER_TEMPLATE.as_ref() {
            Some(style) => pb.with_style(style.clone()),
            None => pb,
        };
        pb.set_message("0 failed");
        pb.enable_steady_tick(Duration::from_millis(120));
        Self { pb }
    }

    pub fn step(&self, status: &Status, failed_so_far: u64) {
        self.pb.inc(1);
        if !status.is_ok() {
            self.pb.set_message(format!("{failed_so_far} failed"));
        }
    }

    /// Status callback that drives this spinner.
    pub fn callback(&self) -> StatusCallback {
        let progress = self.clone();
        let failed = AtomicU64::new(0);
        Arc::new(move |status: &Status| {
            let failed_so_far = if status.is_ok() {
                failed.load(Ordering::Relaxed)
            } else {
                failed.fetch_add(1, Ordering::Relaxed) + 1
            };
            progress.step(status, failed_so_far);
        })
    }

    pub fn finish(&self) { self.pb.finish_and_clear(); }
}
