//! Shared loading contract for filter sources
//!
//! A source is a file or a directory. Directories are expanded with the same
//! walk used for input documents, and every file found is parsed with the
//! loader of the format the source was declared with.

use super::{FilterRegistry, FilterSpec};
use crate::errors::{RegsortError, Result};
use crate::shared::{WalkOptions, walk_files};
use std::fmt;
use std::path::Path;

/// Serialization formats filter sources can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `<filters><filter name=".." flags="..">pattern</filter></filters>`
    Markup,
    /// Declarative list or mapping in JSON, YAML or TOML
    Data,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Markup => write!(f, "markup"),
            SourceFormat::Data => write!(f, "data"),
        }
    }
}

pub trait FilterLoader {
    fn format(&self) -> SourceFormat;

    /// Parse the text of one source file into filter specs, in file order
    fn parse(&self, path: &Path, text: &str) -> Result<Vec<FilterSpec>>;

    /// Load `source` (file or directory) into `registry`, returning the number of filters added
    fn load(&self, source: &Path, registry: &mut FilterRegistry, options: WalkOptions) -> Result<usize> {
        let files = walk_files(source, options).map_err(|e| RegsortError::SourceIo {
            path: e.root,
            source: e.source,
        })?;

        let mut added = 0;
        for file in files {
            let text = std::fs::read_to_string(&file).map_err(|source| RegsortError::SourceIo {
                path: file.clone(),
                source,
            })?;

            let specs = self.parse(&file, &text)?;
            let count = registry.extend(specs)?;
            tracing::debug!("Loaded {} {} filters from {}", count, self.format(), file.display());
            added += count;
        }

        Ok(added)
    }
}

/// Reject entries without a usable name, reporting their 1-based position
pub(crate) fn require_name(path: &Path, position: usize, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(RegsortError::EmptyFilterName {
            path: path.to_path_buf(),
            position,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{DataLoader, MarkupLoader};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_mixed_formats_share_one_load_order() {
        let temp_dir = TempDir::new().unwrap();
        let markup = temp_dir.path().join("first.xml");
        let data = temp_dir.path().join("second.json");
        fs::write(
            &markup,
            r#"<filters><filter name="m1">a</filter><filter name="m2">b</filter></filters>"#,
        )
        .unwrap();
        fs::write(&data, r#"[{"name": "d1", "regex": "c"}]"#).unwrap();

        let mut registry = FilterRegistry::new();
        MarkupLoader
            .load(&markup, &mut registry, WalkOptions::default())
            .unwrap();
        DataLoader
            .load(&data, &mut registry, WalkOptions::default())
            .unwrap();

        let loaded: Vec<(usize, &str)> = registry
            .iter()
            .map(|f| (f.load_order, f.name.as_str()))
            .collect();
        assert_eq!(loaded, vec![(0, "m1"), (1, "m2"), (2, "d1")]);
    }

    #[test]
    fn test_directory_source_is_loaded_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("b.json"), r#"[{"name": "b", "regex": "b"}]"#).unwrap();
        fs::write(root.join("a.json"), r#"[{"name": "a", "regex": "a"}]"#).unwrap();
        fs::write(root.join("nested/c.yaml"), "- name: c\n  regex: c\n").unwrap();

        let mut registry = FilterRegistry::new();
        let added = DataLoader
            .load(root, &mut registry, WalkOptions::default())
            .unwrap();

        assert_eq!(added, 3);
        let names: Vec<&str> = registry.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_loading_is_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("set.yaml");
        fs::write(&source, "zeta: z\nalpha: a\nmid: m\n").unwrap();

        let load = || {
            let mut registry = FilterRegistry::new();
            DataLoader
                .load(&source, &mut registry, WalkOptions::default())
                .unwrap();
            registry
                .iter()
                .map(|f| (f.load_order, f.name.clone()))
                .collect::<Vec<_>>()
        };

        assert_eq!(load(), load());
    }

    #[test]
    fn test_unreadable_source_is_a_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = FilterRegistry::new();

        let err = MarkupLoader
            .load(
                &temp_dir.path().join("missing.xml"),
                &mut registry,
                WalkOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, RegsortError::SourceIo { .. }));
    }
}
