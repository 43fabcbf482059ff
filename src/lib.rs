//! # regsort - sort documents into sets with regular expressions
//!
//! Every document is tested against an ordered list of named filters. A
//! document can land in any number of sets, and a filter with capture groups
//! also records the value its last-closing group matched.
//!
//! ## Quick Start
//!
//! ```bash
//! # One file per filter below sets/, one line per matching document
//! regsort --markup filters.xml --output-dir sets docs/
//!
//! # Classify stdin, print "filter<TAB>value" lines
//! cat mail.txt | regsort --data filters.yaml --pipe --single-match
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use regsort::filters::{FilterRegistry, FilterSpec};
//! use regsort::input::Document;
//! use regsort::pipeline::Classifier;
//! use regsort::router::{OutputRouter, StreamSink};
//!
//! let mut registry = FilterRegistry::new();
//! registry.register(FilterSpec::new("num", r"value: (\d+)"))?;
//!
//! let mut router = OutputRouter::new(StreamSink::new(Vec::new()));
//! let mut classifier = Classifier::new(&registry, false);
//! classifier.classify(&Document::new(None, "value: 42"), &mut router)?;
//!
//! assert_eq!(router.finish()?.into_inner(), b"num\t42\n");
//! # Ok::<(), regsort::RegsortError>(())
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod filters;
pub mod input;
pub mod pipeline;
pub mod router;
pub mod shared;

pub use cli::Cli;
pub use errors::RegsortError;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
