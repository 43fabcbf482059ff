//! Destinations for result lines

use crate::errors::{RegsortError, Result};
use crate::filters::{FilterDefinition, FilterRegistry};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub trait ResultSink {
    /// Whether lines must carry the filter name because the destination does not encode it
    fn names_filter(&self) -> bool;

    /// Append one complete line produced by `filter`
    fn append(&mut self, filter: &FilterDefinition, line: &[u8]) -> Result<()>;

    /// Flush anything still buffered
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// File mode: one append-only file per filter name below a base directory
#[derive(Debug)]
pub struct DirectorySink {
    base: PathBuf,
    created: HashSet<PathBuf>,
}

impl DirectorySink {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            created: HashSet::new(),
        }
    }

    /// Path of the file a filter's lines go to
    ///
    /// Separators in the name become nested directories. Names that are
    /// absolute or contain empty, `.` or `..` segments are rejected so every
    /// destination stays below the base directory.
    pub fn destination(&self, name: &str) -> Result<PathBuf> {
        let invalid = || RegsortError::InvalidFilterName(name.to_string());

        let mut path = self.base.clone();
        for segment in name.split(['/', std::path::MAIN_SEPARATOR]) {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(invalid());
            }
            path.push(segment);
        }
        Ok(path)
    }

    /// Check every name in the registry before anything is written
    pub fn check_names(&self, registry: &FilterRegistry) -> Result<()> {
        for filter in registry {
            self.destination(&filter.name)?;
        }
        Ok(())
    }

    fn ensure_parent(&mut self, file: &Path) -> Result<()> {
        let Some(parent) = file.parent() else {
            return Ok(());
        };
        if self.created.contains(parent) {
            return Ok(());
        }

        fs::create_dir_all(parent).map_err(|source| RegsortError::Output {
            path: parent.to_path_buf(),
            source,
        })?;
        tracing::trace!("Created output directory {}", parent.display());
        self.created.insert(parent.to_path_buf());
        Ok(())
    }
}

impl ResultSink for DirectorySink {
    fn names_filter(&self) -> bool {
        false
    }

    fn append(&mut self, filter: &FilterDefinition, line: &[u8]) -> Result<()> {
        let file = self.destination(&filter.name)?;
        self.ensure_parent(&file)?;

        let output_error = |source: io::Error| RegsortError::Output {
            path: file.clone(),
            source,
        };
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file)
            .and_then(|mut handle| handle.write_all(line))
            .map_err(output_error)
    }
}

/// Stream mode: every line goes to one shared writer, in emission order
#[derive(Debug)]
pub struct StreamSink<W: Write> {
    writer: W,
}

impl<W: Write> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ResultSink for StreamSink<W> {
    fn names_filter(&self) -> bool {
        true
    }

    fn append(&mut self, _filter: &FilterDefinition, line: &[u8]) -> Result<()> {
        self.writer
            .write_all(line)
            .map_err(|source| RegsortError::Output {
                path: PathBuf::from("<stdout>"),
                source,
            })
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(|source| RegsortError::Output {
            path: PathBuf::from("<stdout>"),
            source,
        })
    }
}
