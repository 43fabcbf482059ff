//! Status output for regsort
//!
//! Everything here goes to stderr: in pipe mode stdout carries result lines
//! and nothing else.

use crate::pipeline::RunStats;
use console::style;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("✖").red(), message);
    }

    /// Print an error and every cause below it
    pub fn error_chain(&self, error: &anyhow::Error) {
        self.error(&error.to_string());
        for cause in error.chain().skip(1) {
            eprintln!("  {} {}", style("caused by:").dim(), cause);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print summary statistics with enhanced styling
    pub fn summary_stats(&self, label: &str, value: usize) {
        if self.verbose && !self.quiet {
            eprintln!("  {} {}", style(label).dim(), style(value.to_string()).bold());
        }
    }

    /// Closing summary of a classification run
    pub fn run_summary(&self, stats: &RunStats) {
        if stats.documents == 0 {
            self.warning("No documents were classified");
            return;
        }

        if self.verbose && !self.quiet {
            eprintln!("{} Classification finished", style("✔").green());
        }
        self.summary_stats("documents", stats.documents);
        self.summary_stats("documents with matches", stats.matched_documents);
        self.summary_stats("lines written", stats.lines_written);
    }
}
