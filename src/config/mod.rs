//! Run configuration
//!
//! Settings are layered with figment (see [`RunConfig::load`]) and then
//! checked against the run mode the command line asked for, producing a
//! [`RunPlan`].

pub mod core;
pub mod format;
pub mod overrides;

pub use self::core::RunConfig;
pub use overrides::CliOverrides;

use crate::errors::{RegsortError, Result};
use crate::filters::FilterSources;
use crate::shared::WalkOptions;
use std::path::PathBuf;

/// Where documents come from and where their lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Files and directories in, one append-only file per filter out
    Directory {
        output_dir: PathBuf,
        inputs: Vec<PathBuf>,
    },
    /// One unnamed document from stdin, lines to stdout
    Pipe,
}

/// A validated run
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub sources: FilterSources,
    pub mode: RunMode,
    pub single_match: bool,
    pub walk: WalkOptions,
}

impl RunConfig {
    /// Filter sources in load order; at least one is required
    pub fn sources(&self) -> Result<FilterSources> {
        let sources = FilterSources {
            markup: self.markup_sources.clone(),
            data: self.data_sources.clone(),
        };
        if sources.is_empty() {
            return Err(RegsortError::Configuration(
                "no filter source given; use --markup or --data".to_string(),
            ));
        }
        Ok(sources)
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            follow_links: self.follow_symlinks,
        }
    }

    /// Validate the mode rules and build the plan
    pub fn plan(self, pipe: bool, inputs: Vec<PathBuf>) -> Result<RunPlan> {
        let sources = self.sources()?;
        let walk = self.walk_options();

        let mode = match (pipe, self.output_dir) {
            (true, Some(dir)) => {
                return Err(RegsortError::Configuration(format!(
                    "--pipe cannot be combined with an output directory ({})",
                    dir.display()
                )));
            }
            (true, None) if !inputs.is_empty() => {
                return Err(RegsortError::Configuration(
                    "--pipe reads standard input and takes no file arguments".to_string(),
                ));
            }
            (true, None) => RunMode::Pipe,
            (false, Some(output_dir)) => RunMode::Directory { output_dir, inputs },
            (false, None) => {
                return Err(RegsortError::Configuration(
                    "an output directory is required unless --pipe is given".to_string(),
                ));
            }
        };

        Ok(RunPlan {
            sources,
            mode,
            single_match: self.single_match,
            walk,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RunConfig {
        RunConfig {
            data_sources: vec![PathBuf::from("filters.json")],
            ..Default::default()
        }
    }

    #[test]
    fn test_directory_mode_plan() {
        let config = RunConfig {
            output_dir: Some(PathBuf::from("out")),
            single_match: true,
            ..config()
        };
        let plan = config.plan(false, vec![PathBuf::from("docs")]).unwrap();

        assert_eq!(
            plan.mode,
            RunMode::Directory {
                output_dir: PathBuf::from("out"),
                inputs: vec![PathBuf::from("docs")],
            }
        );
        assert!(plan.single_match);
    }

    #[test]
    fn test_directory_mode_without_inputs_is_legal() {
        let config = RunConfig {
            output_dir: Some(PathBuf::from("out")),
            ..config()
        };
        assert!(config.plan(false, Vec::new()).is_ok());
    }

    #[test]
    fn test_pipe_mode_plan() {
        assert_eq!(config().plan(true, Vec::new()).unwrap().mode, RunMode::Pipe);
    }

    #[test]
    fn test_invalid_combinations() {
        let with_output = RunConfig {
            output_dir: Some(PathBuf::from("out")),
            ..config()
        };
        let cases = [
            (with_output, true, Vec::new()),
            (config(), true, vec![PathBuf::from("doc")]),
            (config(), false, vec![PathBuf::from("doc")]),
            (RunConfig::default(), true, Vec::new()),
        ];

        for (config, pipe, inputs) in cases {
            let err = config.plan(pipe, inputs).unwrap_err();
            assert!(matches!(err, RegsortError::Configuration(_)), "{err}");
        }
    }
}
