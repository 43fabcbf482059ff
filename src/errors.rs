//! Error taxonomy for regsort
//!
//! Every failure is fatal for the run. The variants are grouped into the
//! classes reported by [`RegsortError::class`], which the binary maps to an
//! exit status.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing or contradictory options
    Configuration,
    /// A filter source could not be read, parsed or compiled
    Load,
    /// An input document or directory could not be read
    Input,
    /// An output location could not be created or appended to
    Output,
}

#[derive(Debug, Error)]
pub enum RegsortError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("cannot read filter source {}: {source}", path.display())]
    SourceIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed filter source {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("filter source {} evaluates to nothing", path.display())]
    EmptySource { path: PathBuf },

    #[error("filter source {} has an unexpected shape: {found}", path.display())]
    UnexpectedShape { path: PathBuf, found: String },

    #[error("filter name must not be empty (entry {position} of {})", path.display())]
    EmptyFilterName { path: PathBuf, position: usize },

    #[error("pattern of filter '{name}' does not compile: {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("cannot read input {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write output {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("filter name '{0}' cannot be used as a path below the output directory")]
    InvalidFilterName(String),
}

impl RegsortError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Configuration(_) => ErrorClass::Configuration,
            Self::SourceIo { .. }
            | Self::Malformed { .. }
            | Self::EmptySource { .. }
            | Self::UnexpectedShape { .. }
            | Self::EmptyFilterName { .. }
            | Self::Pattern { .. } => ErrorClass::Load,
            Self::Input { .. } => ErrorClass::Input,
            Self::Output { .. } | Self::InvalidFilterName(_) => ErrorClass::Output,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegsortError>;
