//! Serialization of the Cobertura tree to XML text.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::cobertura::{Class, Condition, Coverage, Line, Method, Package};
use crate::counters::Metrics;
use crate::error::{CobertifyError, Result};

/// Render a complete document, XML declaration included, to a `String`.
pub fn render(coverage: &Coverage) -> Result<String> {
    let mut out = Vec::new();
    write_coverage(coverage, &mut out)?;
    String::from_utf8(out)
        .map_err(|e| CobertifyError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Write a complete document, XML declaration included, to `out`.
pub fn write_coverage<W: Write>(coverage: &Coverage, out: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);
    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", None, None)))?;

    let mut root = BytesStart::new("coverage");
    root.push_attribute(("timestamp", coverage.timestamp.to_string().as_str()));
    push_metrics(&mut root, &coverage.metrics);
    if let Some(info) = &coverage.version {
        root.push_attribute(("version", info.version.as_str()));
        for total in &info.totals {
            let covered = format!("{}-covered", total.prefix);
            let valid = format!("{}-valid", total.prefix);
            root.push_attribute((covered.as_str(), total.covered.as_str()));
            root.push_attribute((valid.as_str(), total.valid.as_str()));
        }
    }
    emit(&mut writer, Event::Start(root))?;

    write_list(&mut writer, "sources", &coverage.sources, |w, source| {
        emit(w, Event::Start(BytesStart::new("source")))?;
        emit(w, Event::Text(BytesText::new(source)))?;
        emit(w, Event::End(BytesEnd::new("source")))
    })?;
    write_list(&mut writer, "packages", &coverage.packages, write_package)?;

    emit(&mut writer, Event::End(BytesEnd::new("coverage")))?;
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

fn write_package<W: Write>(writer: &mut Writer<W>, package: &Package) -> Result<()> {
    let mut el = BytesStart::new("package");
    el.push_attribute(("name", package.name.as_str()));
    push_metrics(&mut el, &package.metrics);

    emit(writer, Event::Start(el))?;
    write_list(writer, "classes", &package.classes, write_class)?;
    emit(writer, Event::End(BytesEnd::new("package")))
}

fn write_class<W: Write>(writer: &mut Writer<W>, class: &Class) -> Result<()> {
    let mut el = BytesStart::new("class");
    el.push_attribute(("name", class.name.as_str()));
    el.push_attribute(("filename", class.filename.as_str()));
    push_metrics(&mut el, &class.metrics);

    emit(writer, Event::Start(el))?;
    write_list(writer, "methods", &class.methods, write_method)?;
    write_list(writer, "lines", &class.lines, write_line)?;
    emit(writer, Event::End(BytesEnd::new("class")))
}

fn write_method<W: Write>(writer: &mut Writer<W>, method: &Method) -> Result<()> {
    let mut el = BytesStart::new("method");
    el.push_attribute(("name", method.name.as_str()));
    el.push_attribute(("signature", method.signature.as_str()));
    push_metrics(&mut el, &method.metrics);

    emit(writer, Event::Start(el))?;
    write_list(writer, "lines", &method.lines, write_line)?;
    emit(writer, Event::End(BytesEnd::new("method")))
}

fn write_line<W: Write>(writer: &mut Writer<W>, line: &Line) -> Result<()> {
    let mut el = BytesStart::new("line");
    el.push_attribute(("number", line.number.to_string().as_str()));
    el.push_attribute(("hits", line.hits.to_string().as_str()));

    let Some(branch) = &line.branch else {
        el.push_attribute(("branch", "false"));
        return emit(writer, Event::Empty(el));
    };

    el.push_attribute(("branch", "true"));
    el.push_attribute(("condition-coverage", branch.condition_coverage().as_str()));
    if branch.conditions.is_empty() {
        return emit(writer, Event::Empty(el));
    }

    emit(writer, Event::Start(el))?;
    write_list(writer, "conditions", &branch.conditions, write_condition)?;
    emit(writer, Event::End(BytesEnd::new("line")))
}

fn write_condition<W: Write>(writer: &mut Writer<W>, condition: &Condition) -> Result<()> {
    let mut el = BytesStart::new("condition");
    el.push_attribute(("number", condition.number.to_string().as_str()));
    el.push_attribute(("type", condition.kind.as_str()));
    el.push_attribute(("coverage", format!("{}%", condition.coverage).as_str()));
    emit(writer, Event::Empty(el))
}

fn push_metrics(el: &mut BytesStart, metrics: &Metrics) {
    el.push_attribute(("line-rate", metrics.line_rate.as_str()));
    el.push_attribute(("branch-rate", metrics.branch_rate.as_str()));
    el.push_attribute(("complexity", metrics.complexity.as_str()));
}

/// Write `<name>` wrapping one child per item, or `<name/>` when empty.
fn write_list<W, T, F>(writer: &mut Writer<W>, name: &str, items: &[T], mut write_item: F) -> Result<()>
where
    W: Write,
    F: FnMut(&mut Writer<W>, &T) -> Result<()>,
{
    if items.is_empty() {
        return emit(writer, Event::Empty(BytesStart::new(name)));
    }
    emit(writer, Event::Start(BytesStart::new(name)))?;
    for item in items {
        write_item(writer, item)?;
    }
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(CobertifyError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cobertura::{BranchCoverage, ConditionType, VersionInfo};
    use crate::counters::Total;

    fn metrics(line_rate: &str) -> Metrics {
        Metrics {
            line_rate: line_rate.to_string(),
            branch_rate: "0.0".to_string(),
            complexity: "0.0".to_string(),
        }
    }

    fn sample() -> Coverage {
        Coverage {
            timestamp: 1_700_000_000,
            metrics: metrics("0.5"),
            version: None,
            sources: vec![".".to_string()],
            packages: vec![Package {
                name: "com.example".to_string(),
                metrics: metrics("0.5"),
                classes: vec![Class {
                    name: "com.example.Foo".to_string(),
                    filename: "com/example/Foo.java".to_string(),
                    metrics: metrics("0.5"),
                    methods: vec![Method {
                        name: "<init>".to_string(),
                        signature: "()V".to_string(),
                        metrics: metrics("1.0"),
                        lines: Vec::new(),
                    }],
                    lines: vec![
                        Line {
                            number: 3,
                            hits: 0,
                            branch: None,
                        },
                        Line {
                            number: 4,
                            hits: 1,
                            branch: Some(BranchCoverage {
                                covered: 1,
                                total: 2,
                                conditions: vec![Condition {
                                    number: 0,
                                    kind: ConditionType::Jump,
                                    coverage: 50,
                                }],
                            }),
                        },
                    ],
                }],
            }],
        }
    }

    #[test]
    fn test_render_structure() {
        let xml = render(&sample()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\"?>\n"), "{xml}");
        assert!(xml.ends_with("</coverage>\n"), "{xml}");
        assert!(xml.contains(
            r#"<coverage timestamp="1700000000" line-rate="0.5" branch-rate="0.0" complexity="0.0">"#
        ));
        assert!(xml.contains("<source>.</source>"));
        assert!(xml.contains(
            r#"<class name="com.example.Foo" filename="com/example/Foo.java" line-rate="0.5""#
        ));
        assert!(xml.contains(r#"<method name="&lt;init&gt;" signature="()V""#));
        assert!(xml.contains(r#"<line number="3" hits="0" branch="false"/>"#));
        assert!(xml.contains(
            r#"<line number="4" hits="1" branch="true" condition-coverage="50% (1/2)">"#
        ));
        assert!(xml.contains(r#"<condition number="0" type="jump" coverage="50%"/>"#));
        let root = xml.lines().nth(1).unwrap();
        assert!(root.starts_with("<coverage "), "{root}");
        assert!(!root.contains(" version="), "{root}");
    }

    #[test]
    fn test_render_version_totals() {
        let mut coverage = sample();
        coverage.version = Some(VersionInfo {
            version: "2.0".to_string(),
            totals: vec![Total {
                prefix: "lines",
                covered: "6".to_string(),
                valid: "8".to_string(),
            }],
        });

        let xml = render(&coverage).unwrap();
        assert!(xml.contains(
            r#"complexity="0.0" version="2.0" lines-covered="6" lines-valid="8">"#
        ));
    }

    #[test]
    fn test_render_empty_lists() {
        let coverage = Coverage {
            timestamp: 0,
            metrics: metrics("0.0"),
            version: None,
            sources: Vec::new(),
            packages: Vec::new(),
        };
        let xml = render(&coverage).unwrap();
        assert!(xml.contains("<sources/>"));
        assert!(xml.contains("<packages/>"));
    }

    #[test]
    fn test_render_escapes_source_text() {
        let mut coverage = sample();
        coverage.sources = vec!["a&b <dir>".to_string()];
        let xml = render(&coverage).unwrap();
        assert!(xml.contains("<source>a&amp;b &lt;dir&gt;</source>"));
    }
}
