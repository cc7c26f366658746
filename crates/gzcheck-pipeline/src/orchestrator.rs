//! Classification, bounded dispatch, aggregation and staging cleanup.
//!
//! Workers run on tokio's blocking pool. A semaphore with `workers` permits
//! caps how many Jobs are in flight, and every Status travels over a bounded
//! channel to a single collector, which is the only owner of the Status list.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::options::{RunOptions, StatusCallback};
use crate::pipeline::run_job;
use crate::report::RunReport;
use crate::staging::StagingRoot;
use crate::status::Status;
use crate::walk::{InputKind, Walker, classify};
use crate::{Error, Result};

/// Compress and verify everything under `options.input`.
///
/// Returns `Err` only for failures that prevent the run from starting.
/// Per-file failures, a walk that stopped early, Jobs whose Status was lost
/// to a panicking worker or callback, and a staging cleanup problem are all
/// reported on the returned [`RunReport`].
pub fn run(options: RunOptions) -> Result<RunReport> {
    let input = options.input.clone();

    let kind = classify(&input)?;
    match kind {
        InputKind::Missing => return Err(Error::MissingInput { path: input }),
        InputKind::Other => return Err(Error::UnsupportedInput { path: input }),
        InputKind::AlreadyCompressed => {
            info!(path = %input.display(), "input is already compressed, skipping");
            return Ok(RunReport::skipped(input));
        }
        InputKind::RegularFile | InputKind::Directory => {}
    }

    let staging = StagingRoot::claim(&options.staging_root)?;
    let walker = Walker::new(&input, kind, &staging);

    info!(input = %input.display(), workers = options.workers, "starting run");
    let mut report = execute(walker, options.workers, options.on_status)?;

    if let Err(e) = staging.cleanup() {
        warn!(error = %e, "staging cleanup failed");
        report.cleanup_error = Some(e.to_string());
    }

    info!(
        processed = report.processed(),
        successful = report.successful(),
        failed = report.failed(),
        "run finished"
    );
    Ok(report)
}

/// Drain `walker` through a pool of `workers` and seal the report.
fn execute(walker: Walker, workers: usize, on_status: Option<StatusCallback>) -> Result<RunReport> {
    let workers = workers.max(1);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .max_blocking_threads(workers)
        .thread_name("gzcheck-worker")
        .build()
        .map_err(Error::Runtime)?;

    let outcome = runtime.block_on(dispatch(walker, workers, on_status));
    drop(runtime);

    let mut report = RunReport::new(outcome.statuses);
    report.dispatched = outcome.dispatched;
    report.walk_error = outcome.walk_error.map(|e| e.to_string());
    report.pool_errors = outcome.pool_errors;
    Ok(report)
}

struct Dispatched {
    statuses:    Vec<Status>,
    dispatched:  usize,
    walk_error:  Option<Error>,
    pool_errors: Vec<String>,
}

async fn dispatch(walker: Walker, workers: usize, on_status: Option<StatusCallback>) -> Dispatched {
    let permits = Arc::new(Semaphore::new(workers));
    let (tx, mut rx) = mpsc::channel::<Status>(workers);

    let collector = tokio::spawn(async move {
        let mut statuses = Vec::new();
        while let Some(status) = rx.recv().await {
            if let Some(callback) = &on_status {
                callback(&status);
            }
            statuses.push(status);
        }
        statuses
    });

    let mut tasks = JoinSet::new();
    let mut walk_error = None;
    let mut pool_errors = Vec::new();
    let mut dispatched = 0usize;

    for job in walker {
        let job = match job {
            Ok(job) => job,
            Err(e) => {
                warn!(error = %e, "walk aborted, waiting for in-flight jobs");
                walk_error = Some(e);
                break;
            }
        };

        // The semaphore is never closed.
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let tx = tx.clone();
        dispatched += 1;

        tasks.spawn_blocking(move || {
            let status = run_job(&job);
            if tx.blocking_send(status).is_err() {
                error!(source = %job.source_path.display(), "status collector is gone, status dropped");
            }
            drop(permit);
        });
    }
    drop(tx);

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "worker terminated abnormally");
            pool_errors.push(format!("worker terminated abnormally: {e}"));
        }
    }

    let statuses = match collector.await {
        Ok(statuses) => statuses,
        Err(e) => {
            error!(error = %e, "status collector terminated abnormally");
            pool_errors.push(format!("status collector terminated abnormally: {e}"));
            Vec::new()
        }
    };
    if statuses.len() != dispatched {
        error!(dispatched, collected = statuses.len(), "status count does not match dispatched jobs");
    }

    Dispatched {
        statuses,
        dispatched,
        walk_error,
        pool_errors,
    }
}
