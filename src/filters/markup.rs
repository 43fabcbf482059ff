//! Structured-markup filter sources
//!
//! ```xml
//! <filters>
//!   <filter name="invoices" flags="i">invoice\s+no</filter>
//!   <filter name="orders/id">order id: (\d+)</filter>
//! </filters>
//! ```
//!
//! The element body is the raw pattern. Text is entity-unescaped and CDATA is
//! taken verbatim; neither is trimmed.

use super::loader::{FilterLoader, SourceFormat, require_name};
use super::FilterSpec;
use crate::errors::{RegsortError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

const ROOT_TAG: &[u8] = b"filters";
const FILTER_TAG: &[u8] = b"filter";

#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupLoader;

/// Where the reader currently is in the document
enum Position {
    Prolog,
    InRoot,
    InFilter(FilterSpec),
    Closed,
}

impl FilterLoader for MarkupLoader {
    fn format(&self) -> SourceFormat {
        SourceFormat::Markup
    }

    fn parse(&self, path: &Path, text: &str) -> Result<Vec<FilterSpec>> {
        let mut reader = Reader::from_str(text);
        let mut specs = Vec::new();
        let mut position = Position::Prolog;

        loop {
            let event = reader.read_event().map_err(|e| {
                RegsortError::malformed(path, format!("{e} (near byte {})", reader.buffer_position()))
            })?;

            position = match (position, event) {
                (position, Event::Eof) => {
                    return match position {
                        Position::Closed => Ok(specs),
                        Position::Prolog => Err(RegsortError::malformed(
                            path,
                            "missing <filters> root element",
                        )),
                        _ => Err(RegsortError::malformed(path, "unexpected end of input")),
                    };
                }

                (Position::Prolog, Event::Start(e)) if e.name().as_ref() == ROOT_TAG => {
                    Position::InRoot
                }
                (Position::Prolog, Event::Empty(e)) if e.name().as_ref() == ROOT_TAG => {
                    Position::Closed
                }

                (Position::InRoot, Event::Start(e)) if e.name().as_ref() == FILTER_TAG => {
                    Position::InFilter(filter_head(path, specs.len() + 1, &e)?)
                }
                (Position::InRoot, Event::Empty(e)) if e.name().as_ref() == FILTER_TAG => {
                    specs.push(filter_head(path, specs.len() + 1, &e)?);
                    Position::InRoot
                }
                (Position::InRoot, Event::End(_)) => Position::Closed,

                (Position::InFilter(mut spec), Event::Text(t)) => {
                    let body = t.unescape().map_err(|e| RegsortError::malformed(path, e))?;
                    spec.pattern.push_str(&body);
                    Position::InFilter(spec)
                }
                (Position::InFilter(mut spec), Event::CData(c)) => {
                    let body = std::str::from_utf8(&c).map_err(|e| RegsortError::malformed(path, e))?;
                    spec.pattern.push_str(body);
                    Position::InFilter(spec)
                }
                (Position::InFilter(spec), Event::End(_)) => {
                    specs.push(spec);
                    Position::InRoot
                }

                (position, Event::Text(t)) => {
                    let stray = t.unescape().map_err(|e| RegsortError::malformed(path, e))?;
                    if !stray.trim().is_empty() {
                        return Err(RegsortError::malformed(
                            path,
                            format!("unexpected text '{}' outside a <filter>", stray.trim()),
                        ));
                    }
                    position
                }
                (_, Event::CData(_)) => {
                    return Err(RegsortError::malformed(path, "unexpected CDATA outside a <filter>"));
                }

                (position, Event::Start(e) | Event::Empty(e)) => {
                    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    let reason = match position {
                        Position::Prolog => format!("root element must be <filters>, found <{tag}>"),
                        Position::InRoot => format!("unexpected <{tag}> inside <filters>"),
                        Position::InFilter(_) => format!("unexpected <{tag}> inside <filter>"),
                        Position::Closed => format!("unexpected <{tag}> after </filters>"),
                    };
                    return Err(RegsortError::malformed(path, reason));
                }

                // Declarations, comments, processing instructions, doctypes
                (position, _) => position,
            };
        }
    }
}

/// Read the `name` and `flags` attributes of a `<filter>` element
fn filter_head(path: &Path, position: usize, element: &BytesStart<'_>) -> Result<FilterSpec> {
    let mut name = None;
    let mut flags = None;

    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| RegsortError::malformed(path, e))?;
        let value = attribute
            .unescape_value()
            .map_err(|e| RegsortError::malformed(path, e))?
            .into_owned();

        match attribute.key.as_ref() {
            b"name" => name = Some(value),
            b"flags" => flags = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| {
        RegsortError::malformed(path, format!("filter {position} has no name attribute"))
    })?;
    require_name(path, position, &name)?;

    Ok(FilterSpec {
        name,
        pattern: String::new(),
        flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Vec<FilterSpec>> {
        MarkupLoader.parse(Path::new("test.xml"), text)
    }

    #[test]
    fn test_parse_filters_in_order() {
        let specs = parse(
            r#"<?xml version="1.0"?>
<!-- sets -->
<filters>
  <filter name="set1" flags="i">foo</filter>
  <filter name="set2">bar</filter>
</filters>
"#,
        )
        .unwrap();

        assert_eq!(
            specs,
            vec![
                FilterSpec::new("set1", "foo").with_flags("i"),
                FilterSpec::new("set2", "bar"),
            ]
        );
    }

    #[test]
    fn test_body_is_unescaped_and_untrimmed() {
        let specs = parse(
            r#"<filters><filter name="lt"> a&lt;b </filter><filter name="raw"><![CDATA[x<y&z]]></filter></filters>"#,
        )
        .unwrap();

        assert_eq!(specs[0].pattern, " a<b ");
        assert_eq!(specs[1].pattern, "x<y&z");
    }

    #[test]
    fn test_self_closing_filter_has_empty_pattern() {
        let specs = parse(r#"<filters><filter name="all"/></filters>"#).unwrap();
        assert_eq!(specs, vec![FilterSpec::new("all", "")]);
    }

    #[test]
    fn test_empty_root_is_legal() {
        assert!(parse("<filters/>").unwrap().is_empty());
        assert!(parse("<filters>\n</filters>").unwrap().is_empty());
    }

    #[test]
    fn test_nested_names_are_kept() {
        let specs = parse(r#"<filters><filter name="a/b/c">x</filter></filters>"#).unwrap();
        assert_eq!(specs[0].name, "a/b/c");
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let err = parse(r#"<filters><filter flags="i">x</filter></filters>"#).unwrap_err();
        assert!(err.to_string().contains("no name"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = parse(r#"<filters><filter name="">x</filter></filters>"#).unwrap_err();
        assert!(matches!(err, RegsortError::EmptyFilterName { position: 1, .. }));
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        for text in [
            "",
            "<patterns><filter name=\"a\">x</filter></patterns>",
            "<filters><filter name=\"a\">x</filter>",
            "<filters><filter name=\"a\">x</wrong></filters>",
            "<filters><rule name=\"a\">x</rule></filters>",
            "<filters><filter name=\"a\"><b/></filter></filters>",
            "<filters>stray<filter name=\"a\">x</filter></filters>",
            "<filters/><filters/>",
        ] {
            let result = parse(text);
            assert!(
                matches!(result, Err(RegsortError::Malformed { .. })),
                "expected malformed error for {text:?}, got {result:?}"
            );
        }
    }
}
