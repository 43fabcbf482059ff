//! Matching engine
//!
//! [`evaluate`] tests every filter in the registry against one document, and
//! [`resolve`] narrows the matches down to one when only the earliest match
//! of a document is wanted.

pub mod matcher;
pub mod resolver;

pub use matcher::{Evaluation, MatchHit, evaluate, last_closed_group, test_filter};
pub use resolver::resolve;
