//! Documents and where they come from

use crate::errors::{RegsortError, Result};
use crate::shared::{WalkOptions, walk_files};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Display name used for content read from an unnamed stream
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// One unit of input, held entirely in memory while it is classified
#[derive(Debug, Clone)]
pub struct Document {
    /// Basename of the source file; `None` for an unnamed stream
    pub identity: Option<String>,
    pub content: Vec<u8>,
}

impl Document {
    pub fn new(identity: Option<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            identity,
            content: content.into(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read(path).map_err(|source| RegsortError::Input {
            path: path.to_path_buf(),
            source,
        })?;

        let identity = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            identity: Some(identity),
            content,
        })
    }

    /// Read a whole unnamed stream as a single document
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|source| RegsortError::Input {
                path: PathBuf::from("<stdin>"),
                source,
            })?;

        Ok(Self {
            identity: None,
            content,
        })
    }

    pub fn display_name(&self) -> &str {
        self.identity.as_deref().unwrap_or(UNKNOWN_IDENTITY)
    }
}

/// Expand input arguments into document paths, directories recursively
///
/// Only paths are collected; each document is read when it is processed.
pub fn document_paths(inputs: &[PathBuf], options: WalkOptions) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        let files = walk_files(input, options).map_err(|e| RegsortError::Input {
            path: e.root,
            source: e.source,
        })?;
        paths.extend(files);
    }
    Ok(paths)
}
