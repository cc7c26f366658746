use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use gzcheck_pipeline::{RunReport, run};
use tracing_subscriber::FmtSubscriber;

use cli::App;
use progress::FileProgress;

mod cli;
mod progress;

const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let app = App::parse();

    let Some(input) = app.input.clone() else {
        eprintln!("error: --input <PATH> is required\n");
        eprintln!("{}", App::command().render_usage());
        return ExitCode::from(EXIT_USAGE);
    };

    if let Err(e) = init_logging(&app) {
        eprintln!("warning: {e:#}");
    }

    match execute(&app, input) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(app: &App) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(app.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("failed to install logger")
}

fn execute(app: &App, input: std::path::PathBuf) -> anyhow::Result<RunReport> {
    let progress = FileProgress::new(app.show_progress());
    let options = app.run_options(input.clone()).on_status(progress.callback());

    let result = run(options);
    progress.finish();
    let report = result.with_context(|| format!("cannot process '{}'", input.display()))?;

    if app.json {
        println!("{}", report.to_json().context("failed to encode report")?);
        return Ok(report);
    }

    print_report(&report);
    Ok(report)
}

fn print_report(report: &RunReport) {
    if let Some(path) = &report.skipped {
        println!("Skipping already-compressed input: {}", path.display());
    }

    println!("{}", report.summary());
    for failure in report.failures() {
        eprintln!("{failure}");
    }
    if let Some(e) = &report.walk_error {
        eprintln!("walk_failed: {e}");
    }
    for e in &report.pool_errors {
        eprintln!("pool_failed: {e}");
    }
    if report.lost() > 0 {
        eprintln!("{} files produced no status", report.lost());
    }
    if let Some(e) = &report.cleanup_error {
        eprintln!("warning: {e}");
    }
}
