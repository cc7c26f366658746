//! Compress files with gzip and prove each artifact round-trips.
//!
//! # Architecture
//!
//! - `walk.rs` - Input classification and Job enumeration
//! - `pipeline.rs` - Per-Job compress, stage, decompress, verify
//! - `orchestrator.rs` - Bounded worker pool and Status aggregation
//! - `staging.rs` - Scratch directory lifetime
//! - `job.rs`, `status.rs`, `report.rs` - Shared types
//!
//! # Example
//!
//! ```no_run
//! use gzcheck_pipeline::{RunOptions, run};
//!
//! let report = run(RunOptions::new("logs").workers(4)).unwrap();
//! println!("{}", report.summary());
//! for failure in report.failures() {
//!     eprintln!("{failure}");
//! }
//! ```

pub use error::{Error, Result};
pub use job::{Job, compressed_path_for, is_compressed_name};
pub use options::{DEFAULT_STAGING_DIR, RunOptions, StatusCallback, default_workers};
pub use orchestrator::run;
pub use pipeline::{decompress_and_verify, run_job};
pub use report::RunReport;
pub use staging::StagingRoot;
pub use status::{Outcome, Status};
pub use walk::{InputKind, Walker, classify};

mod error;
mod job;
mod options;
mod orchestrator;
mod pipeline;
mod report;
mod staging;
mod status;
mod walk;
