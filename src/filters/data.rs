//! Declarative data filter sources
//!
//! Sources are plain data, never code. Three shapes are accepted, in JSON,
//! YAML or TOML (chosen by file extension):
//!
//! - an ordered list of `{name, regex, flags}` records
//! - an object whose only key is `filters`, holding such a list
//! - an unordered `{name: pattern}` mapping, loaded in name order

use super::loader::{FilterLoader, SourceFormat, require_name};
use super::FilterSpec;
use crate::errors::{RegsortError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct DataLoader;

/// One entry of the ordered-list shape
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilterRecord {
    name: String,
    #[serde(alias = "pattern")]
    regex: String,
    #[serde(default)]
    flags: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataSyntax {
    Json,
    Yaml,
    Toml,
}

impl DataSyntax {
    fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    fn read(self, path: &Path, text: &str) -> Result<Value> {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let value = match self {
            Self::Json => serde_json::from_str(text).map_err(|e| RegsortError::malformed(path, e))?,
            Self::Yaml => serde_yml::from_str(text).map_err(|e| RegsortError::malformed(path, e))?,
            Self::Toml => toml::from_str(text).map_err(|e| RegsortError::malformed(path, e))?,
        };
        Ok(value)
    }
}

impl FilterLoader for DataLoader {
    fn format(&self) -> SourceFormat {
        SourceFormat::Data
    }

    fn parse(&self, path: &Path, text: &str) -> Result<Vec<FilterSpec>> {
        let syntax = DataSyntax::from_path(path).ok_or_else(|| {
            RegsortError::malformed(path, "unsupported extension (expected .json, .yaml, .yml or .toml)")
        })?;

        specs_from_value(path, syntax.read(path, text)?)
    }
}

/// Interpret a parsed data value as one of the accepted shapes
fn specs_from_value(path: &Path, value: Value) -> Result<Vec<FilterSpec>> {
    match value {
        Value::Null | Value::Bool(false) => Err(RegsortError::EmptySource {
            path: path.to_path_buf(),
        }),
        Value::Array(records) => specs_from_records(path, records),
        Value::Object(map) => match wrapped_records(map) {
            Ok(records) => specs_from_records(path, records),
            Err(map) => specs_from_mapping(path, map),
        },
        other => Err(RegsortError::UnexpectedShape {
            path: path.to_path_buf(),
            found: describe(&other).to_string(),
        }),
    }
}

/// Unwrap `{filters: [...]}`, handing any other mapping back untouched
fn wrapped_records(mut map: Map<String, Value>) -> std::result::Result<Vec<Value>, Map<String, Value>> {
    match map.remove("filters") {
        Some(Value::Array(records)) if map.is_empty() => Ok(records),
        Some(other) => {
            map.insert("filters".to_string(), other);
            Err(map)
        }
        None => Err(map),
    }
}

/// Mappings carry no order of their own, so entries load sorted by name
fn specs_from_mapping(path: &Path, map: Map<String, Value>) -> Result<Vec<FilterSpec>> {
    let mut entries: Vec<(String, Value)> = map.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut specs = Vec::with_capacity(entries.len());
    for (position, (name, pattern)) in entries.into_iter().enumerate() {
        let Value::String(pattern) = pattern else {
            return Err(RegsortError::UnexpectedShape {
                path: path.to_path_buf(),
                found: format!("mapping value for '{name}' is {}", describe(&pattern)),
            });
        };
        require_name(path, position + 1, &name)?;
        specs.push(FilterSpec::new(name, pattern));
    }
    Ok(specs)
}

fn specs_from_records(path: &Path, records: Vec<Value>) -> Result<Vec<FilterSpec>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let position = index + 1;
            if !record.is_object() {
                return Err(RegsortError::UnexpectedShape {
                    path: path.to_path_buf(),
                    found: format!("entry {position} is {}", describe(&record)),
                });
            }

            let record: FilterRecord = serde_json::from_value(record).map_err(|e| {
                RegsortError::malformed(path, format!("entry {position}: {e}"))
            })?;
            require_name(path, position, &record.name)?;

            Ok(FilterSpec {
                name: record.name,
                pattern: record.regex,
                flags: record.flags,
            })
        })
        .collect()
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(file: &str, text: &str) -> Result<Vec<FilterSpec>> {
        DataLoader.parse(Path::new(file), text)
    }

    #[test]
    fn test_json_record_list_keeps_order() {
        let specs = parse(
            "set.json",
            r#"[
                {"name": "set2", "regex": "bar"},
                {"name": "set1", "regex": "foo", "flags": "i"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            specs,
            vec![
                FilterSpec::new("set2", "bar"),
                FilterSpec::new("set1", "foo").with_flags("i"),
            ]
        );
    }

    #[test]
    fn test_yaml_record_list_accepts_pattern_alias() {
        let specs = parse("set.yml", "- name: num\n  pattern: 'value: (\\d+)'\n").unwrap();
        assert_eq!(specs, vec![FilterSpec::new("num", r"value: (\d+)")]);
    }

    #[test]
    fn test_toml_filters_table() {
        let specs = parse(
            "set.toml",
            r#"
[[filters]]
name = "first"
regex = "a+"

[[filters]]
name = "second"
regex = "b+"
flags = "i"
"#,
        )
        .unwrap();

        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(specs[1].flags.as_deref(), Some("i"));
    }

    #[test]
    fn test_mapping_loads_in_name_order() {
        let specs = parse("set.yaml", "zeta: z+\nalpha: '(?i)a'\n").unwrap();
        assert_eq!(
            specs,
            vec![FilterSpec::new("alpha", "(?i)a"), FilterSpec::new("zeta", "z+")]
        );
    }

    #[test]
    fn test_mapping_named_filters_with_string_value() {
        let specs = parse("set.json", r#"{"filters": "f+"}"#).unwrap();
        assert_eq!(specs, vec![FilterSpec::new("filters", "f+")]);
    }

    #[test]
    fn test_empty_list_is_legal() {
        assert!(parse("set.json", "[]").unwrap().is_empty());
    }

    #[test]
    fn test_nothing_is_rejected() {
        for (file, text) in [("a.json", "null"), ("a.json", "false"), ("a.json", "  "), ("a.yaml", "")] {
            let result = parse(file, text);
            assert!(
                matches!(result, Err(RegsortError::EmptySource { .. })),
                "{file} {text:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_wrong_shapes_are_rejected() {
        for text in ["42", r#""foo""#, "[1, 2]", r#"{"a": ["x"]}"#, "true"] {
            let result = parse("a.json", text);
            assert!(
                matches!(result, Err(RegsortError::UnexpectedShape { .. })),
                "{text:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_bad_records_are_rejected() {
        assert!(matches!(
            parse("a.json", r#"[{"name": "x"}]"#),
            Err(RegsortError::Malformed { .. })
        ));
        assert!(matches!(
            parse("a.json", r#"[{"name": "x", "regex": "y", "extra": 1}]"#),
            Err(RegsortError::Malformed { .. })
        ));
        assert!(matches!(
            parse("a.json", r#"[{"name": "", "regex": "y"}]"#),
            Err(RegsortError::EmptyFilterName { position: 1, .. })
        ));
    }

    #[test]
    fn test_syntax_errors_and_extensions() {
        assert!(matches!(parse("a.json", "[{"), Err(RegsortError::Malformed { .. })));
        assert!(matches!(parse("a.txt", "[]"), Err(RegsortError::Malformed { .. })));
        assert!(matches!(parse("a.toml", "= broken"), Err(RegsortError::Malformed { .. })));
    }
}
