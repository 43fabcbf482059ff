use crate::errors::{RegsortError, Result};
use regex::bytes::{Captures, Regex};

/// A filter entry as read from a source, before its pattern is compiled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub name: String,
    pub pattern: String,
    /// Engine modifier letters, e.g. `i` or `ms`
    pub flags: Option<String>,
}

impl FilterSpec {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            flags: None,
        }
    }

    pub fn with_flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }
}

/// Compiled regular expression plus the text it was built from
#[derive(Debug, Clone)]
pub struct FilterPattern {
    regex: Regex,
    source: String,
}

impl FilterPattern {
    /// Compile `body`, prepending an inline modifier group when `flags` is non-empty
    pub fn compile(body: &str, flags: Option<&str>) -> std::result::Result<Self, regex::Error> {
        let source = match flags.map(str::trim) {
            Some(flags) if !flags.is_empty() => format!("(?{flags}){body}"),
            _ => body.to_string(),
        };
        let regex = Regex::new(&source)?;
        Ok(Self { regex, source })
    }

    /// Effective pattern text, including any synthesized modifier prefix
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn has_groups(&self) -> bool {
        self.regex.captures_len() > 1
    }

    /// Unanchored search of `haystack` starting at byte offset `start`
    pub fn search<'h>(&self, haystack: &'h [u8], start: usize) -> Option<Captures<'h>> {
        self.regex.captures_at(haystack, start)
    }

    /// Start offset of the leftmost match, without resolving capture groups
    pub fn find_start(&self, haystack: &[u8], start: usize) -> Option<usize> {
        self.regex.find_at(haystack, start).map(|m| m.start())
    }
}

/// A named pattern with its position in the registry
#[derive(Debug, Clone)]
pub struct FilterDefinition {
    pub name: String,
    pub pattern: FilterPattern,
    /// Global position across all loaded sources, used for tie-breaking
    pub load_order: usize,
}

impl FilterDefinition {
    pub(crate) fn from_spec(spec: FilterSpec, load_order: usize) -> Result<Self> {
        let pattern = FilterPattern::compile(&spec.pattern, spec.flags.as_deref()).map_err(
            |source| RegsortError::Pattern {
                name: spec.name.clone(),
                source,
            },
        )?;

        Ok(Self {
            name: spec.name,
            pattern,
            load_order,
        })
    }
}
