//! Command-line interface for regsort
//!
//! Parses flags with clap, sets up logging, layers the configuration and
//! dispatches to one of the run modes.

use crate::config::{CliOverrides, RunConfig};
use crate::errors::{ErrorClass, RegsortError};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod execute;
mod output;

pub use output::Output;

/// Sort documents into named sets by matching them against regular expressions
#[derive(Parser, Debug)]
#[command(
    name = "regsort",
    version,
    about = "Sort documents into named sets by matching them against regular expressions",
    long_about = "Every document is tested against every filter. Matches are appended to one \
                  file per filter below the output directory, or, with --pipe, a single \
                  document is read from stdin and matches are written to stdout."
)]
pub struct Cli {
    /// Files or directories to classify
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Structured-markup filter source, file or directory (repeatable)
    #[arg(short = 'x', long = "markup", value_name = "PATH")]
    pub markup: Vec<PathBuf>,

    /// Data filter source (.json, .yaml, .toml), file or directory (repeatable)
    #[arg(short = 'd', long = "data", value_name = "PATH")]
    pub data: Vec<PathBuf>,

    /// Base directory for per-filter output files
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Read one document from stdin and write result lines to stdout
    #[arg(short, long)]
    pub pipe: bool,

    /// Emit only the earliest match of each document
    #[arg(short = '1', long)]
    pub single_match: bool,

    /// Follow symbolic links while walking directories
    #[arg(short = 'L', long)]
    pub follow_symlinks: bool,

    /// Print the loaded filters in load order and exit
    #[arg(long)]
    pub list_filters: bool,

    /// Use custom configuration file
    #[arg(short, long, value_name = "FILE", env = "REGSORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        let config = RunConfig::load(self.config.as_deref(), &self.overrides())?;
        tracing::debug!("Effective configuration: {:?}", config);

        if self.list_filters {
            return execute::list_filters(&config);
        }

        let plan = config.plan(self.pipe, self.paths)?;
        execute::classify(plan, &output)
    }

    /// Flags that override lower configuration layers; absent flags override nothing
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            markup_sources: self.markup.clone(),
            data_sources: self.data.clone(),
            output_dir: self.output_dir.clone(),
            single_match: self.single_match.then_some(true),
            follow_symlinks: self.follow_symlinks.then_some(true),
        }
    }
}

/// Exit status for a failed run: 2 for configuration problems, 1 otherwise
pub fn exit_status(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<RegsortError>().map(RegsortError::class) {
        Some(ErrorClass::Configuration) => 2,
        _ => 1,
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => tracing_subscriber::EnvFilter::new("warn"),
        1 => tracing_subscriber::EnvFilter::new("info,ignore=warn"),
        2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
