use crate::filters::{FilterDefinition, FilterRegistry};
use crate::input::Document;
use regex::bytes::Captures;

/// A successful search of one filter against one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchHit {
    /// Byte offset where the overall match starts
    pub start: usize,
    /// Value of the last capture group to close; `None` when no group took part
    pub captured: Option<Vec<u8>>,
}

/// Outcome of testing one filter against one document
#[derive(Debug, Clone)]
pub struct Evaluation<'r> {
    pub filter: &'r FilterDefinition,
    pub hit: Option<MatchHit>,
}

impl Evaluation<'_> {
    pub fn matched(&self) -> bool {
        self.hit.is_some()
    }
}

/// Test one filter against `content`, searching the whole haystack
pub fn test_filter(filter: &FilterDefinition, content: &[u8]) -> Option<MatchHit> {
    let pattern = &filter.pattern;

    if !pattern.has_groups() {
        return pattern.find_start(content, 0).map(|start| MatchHit {
            start,
            captured: None,
        });
    }

    let captures = pattern.search(content, 0)?;
    let start = captures.get(0).map_or(0, |m| m.start());
    Some(MatchHit {
        start,
        captured: last_closed_group(&captures).map(<[u8]>::to_vec),
    })
}

/// Pick the participating group that closed last
///
/// Greatest end offset wins. Groups ending at the same offset are either
/// nested or an empty group following another, and in both cases the higher
/// index is the one that closed later.
pub fn last_closed_group<'h>(captures: &Captures<'h>) -> Option<&'h [u8]> {
    captures
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(index, group)| group.map(|m| (m.end(), index, m)))
        .max_by_key(|&(end, index, _)| (end, index))
        .map(|(_, _, m)| m.as_bytes())
}

/// Run every filter against `document`, in registry order
pub fn evaluate<'r>(document: &Document, registry: &'r FilterRegistry) -> Vec<Evaluation<'r>> {
    registry
        .iter()
        .map(|filter| Evaluation {
            filter,
            hit: test_filter(filter, &document.content),
        })
        .collect()
}
