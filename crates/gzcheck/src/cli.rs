use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use gzcheck_pipeline::{DEFAULT_STAGING_DIR, RunOptions};
use tracing::Level;

#[derive(Clone, Debug, Parser)]
#[command(name = "gzcheck", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// File or directory to compress and verify
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Scratch directory for decompressed copies; must not exist yet
    #[arg(long, value_name = "DIR", default_value = DEFAULT_STAGING_DIR)]
    pub staging_dir: PathBuf,

    /// Number of files processed at once [default: min(CPUs, 8)]
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<NonZeroUsize>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only errors, no progress
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl App {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    pub fn show_progress(&self) -> bool { !self.quiet && !self.json }

    pub fn run_options(&self, input: PathBuf) -> RunOptions {
        let options = RunOptions::new(input).staging_root(&self.staging_dir);
        match self.jobs {
            Some(n) => options.workers(n.get()),
            None => options,
        }
    }
}
