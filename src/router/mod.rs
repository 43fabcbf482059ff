//! Output routing
//!
//! Turns a document's (possibly resolved) matches into tab-separated lines:
//!
//! ```text
//! [identity TAB] [filter name TAB] [captured value] LF
//! ```
//!
//! The identity is left out for unnamed stream input, the filter name is
//! left out in file mode where the destination file already names it, and
//! the captured value is left out when no capture group took part.

pub mod sink;

pub use sink::{DirectorySink, ResultSink, StreamSink};

use crate::engine::Evaluation;
use crate::errors::Result;
use crate::input::Document;

/// Build one output line
pub fn format_line(identity: Option<&str>, filter_name: Option<&str>, captured: Option<&[u8]>) -> Vec<u8> {
    let mut line = Vec::new();
    if let Some(identity) = identity {
        line.extend_from_slice(identity.as_bytes());
        line.push(b'\t');
    }
    if let Some(name) = filter_name {
        line.extend_from_slice(name.as_bytes());
        line.push(b'\t');
    }
    if let Some(captured) = captured {
        line.extend_from_slice(captured);
    }
    line.push(b'\n');
    line
}

/// Writes result lines to a sink
pub struct OutputRouter<S: ResultSink> {
    sink: S,
}

impl<S: ResultSink> OutputRouter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Emit one line per matched evaluation, in the given order
    pub fn emit(&mut self, document: &Document, results: &[Evaluation<'_>]) -> Result<usize> {
        let names_filter = self.sink.names_filter();
        let mut emitted = 0;

        for evaluation in results {
            let Some(hit) = &evaluation.hit else {
                continue;
            };

            let filter_name = names_filter.then_some(evaluation.filter.name.as_str());
            let line = format_line(document.identity.as_deref(), filter_name, hit.captured.as_deref());
            self.sink.append(evaluation.filter, &line)?;
            emitted += 1;
        }

        Ok(emitted)
    }

    pub fn finish(mut self) -> Result<S> {
        self.sink.finish()?;
        Ok(self.sink)
    }
}
