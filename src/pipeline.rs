//! Per-document classification: evaluate, optionally resolve, emit

use crate::engine::{evaluate, resolve};
use crate::errors::Result;
use crate::filters::FilterRegistry;
use crate::input::Document;
use crate::router::{OutputRouter, ResultSink};
use std::path::Path;

/// Counters for one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub documents: usize,
    pub matched_documents: usize,
    pub lines_written: usize,
}

pub struct Classifier<'r> {
    registry: &'r FilterRegistry,
    single_match: bool,
    stats: RunStats,
}

impl<'r> Classifier<'r> {
    pub fn new(registry: &'r FilterRegistry, single_match: bool) -> Self {
        Self {
            registry,
            single_match,
            stats: RunStats::default(),
        }
    }

    /// Classify one document and route its lines, returning how many were written
    pub fn classify<S: ResultSink>(&mut self, document: &Document, router: &mut OutputRouter<S>) -> Result<usize> {
        let matched: Vec<_> = evaluate(document, self.registry)
            .into_iter()
            .filter(|evaluation| evaluation.matched())
            .collect();

        let selected: Vec<_> = if self.single_match {
            resolve(matched).into_iter().collect()
        } else {
            matched
        };

        let emitted = router.emit(document, &selected)?;
        tracing::debug!(
            "{}: {} of {} filters emitted",
            document.display_name(),
            emitted,
            self.registry.len()
        );

        self.stats.documents += 1;
        if emitted > 0 {
            self.stats.matched_documents += 1;
        }
        self.stats.lines_written += emitted;
        Ok(emitted)
    }

    /// Read and classify each file in turn; contents are dropped once routed
    pub fn classify_paths<S, P>(&mut self, paths: &[P], router: &mut OutputRouter<S>) -> Result<()>
    where
        S: ResultSink,
        P: AsRef<Path>,
    {
        for path in paths {
            let document = Document::from_path(path.as_ref())?;
            self.classify(&document, router)?;
        }
        Ok(())
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }
}
