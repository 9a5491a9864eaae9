/// Parser for JaCoCo XML coverage reports.
///
/// JaCoCo XML structure:
///   <report name="...">
///     <sessioninfo id="..." start="..." dump="..."/>
///     <group name="...">            (optional, may nest)
///       <package .../>
///     </group>
///     <package name="com/example">
///       <class name="com/example/Foo" sourcefilename="Foo.java">
///         <method name="doStuff" desc="()V" line="10">
///           <counter type="INSTRUCTION" missed="0" covered="5"/>
///           ...
///         </method>
///         <counter type="LINE" missed="1" covered="5"/>
///       </class>
///       <sourcefile name="Foo.java">
///         <line nr="10" mi="0" ci="3" mb="0" cb="2"/>
///         ...
///       </sourcefile>
///       <counter .../>
///     </package>
///     <counter .../>
///   </report>
///
/// The document is first read into a generic tree by [`crate::xml`]; this
/// module checks it against the shape above. Missing mandatory attributes
/// and non-numeric counts are errors, unknown elements are skipped.
use std::str::FromStr;

use crate::error::{CobertifyError, Result};
use crate::model::*;
use crate::parsers::Parser;
use crate::xml::{self, XmlElement};

pub struct JacocoParser;

impl Parser for JacocoParser {
    fn parse(&self, input: &[u8]) -> Result<Report> {
        parse(input)
    }
}

/// Parse JaCoCo XML from raw bytes.
pub fn parse(input: &[u8]) -> Result<Report> {
    let root = xml::parse_document(input)?;
    report_from_tree(&root)
}

/// Build a typed [`Report`] from an already materialized XML tree.
pub fn report_from_tree(root: &XmlElement) -> Result<Report> {
    if root.name != "report" {
        return Err(CobertifyError::Parse(format!(
            "expected <report> root element, found <{}>",
            root.name
        )));
    }

    // Merged reports carry one <sessioninfo> per session; the first one wins.
    let session = root
        .first_child("sessioninfo")
        .ok_or(CobertifyError::MissingElement {
            parent: "report",
            element: "sessioninfo",
        })?;
    let session_start = required_number(session, "sessioninfo", "start")?;

    let mut packages = Vec::new();
    collect_packages(root, &mut packages)?;

    Ok(Report {
        name: root.attr("name").map(str::to_string),
        session_start,
        packages,
        counters: parse_counters(root)?,
    })
}

/// Gather packages in document order, descending into `<group>`s.
fn collect_packages(node: &XmlElement, out: &mut Vec<Package>) -> Result<()> {
    for child in &node.children {
        match child.name.as_str() {
            "package" => out.push(parse_package(child)?),
            "group" => collect_packages(child, out)?,
            _ => {}
        }
    }
    Ok(())
}

fn parse_package(el: &XmlElement) -> Result<Package> {
    let classes = el
        .children_named("class")
        .map(parse_class)
        .collect::<Result<Vec<_>>>()?;
    let sourcefiles = el
        .children_named("sourcefile")
        .map(parse_sourcefile)
        .collect::<Result<Vec<_>>>()?;

    Ok(Package {
        name: required(el, "package", "name")?.to_string(),
        classes,
        sourcefiles,
        counters: parse_counters(el)?,
    })
}

fn parse_class(el: &XmlElement) -> Result<Class> {
    let methods = el
        .children_named("method")
        .map(parse_method)
        .collect::<Result<Vec<_>>>()?;

    Ok(Class {
        name: required(el, "class", "name")?.to_string(),
        methods,
        counters: parse_counters(el)?,
    })
}

fn parse_method(el: &XmlElement) -> Result<Method> {
    Ok(Method {
        name: required(el, "method", "name")?.to_string(),
        desc: required(el, "method", "desc")?.to_string(),
        line: optional_number(el, "method", "line")?,
        counters: parse_counters(el)?,
    })
}

fn parse_sourcefile(el: &XmlElement) -> Result<SourceFile> {
    let lines = el
        .children_named("line")
        .map(parse_line)
        .collect::<Result<Vec<_>>>()?;

    Ok(SourceFile {
        name: required(el, "sourcefile", "name")?.to_string(),
        lines,
        counters: parse_counters(el)?,
    })
}

fn parse_line(el: &XmlElement) -> Result<Line> {
    Ok(Line {
        number: required_number(el, "line", "nr")?,
        missed_branches: required_number(el, "line", "mb")?,
        covered_branches: required_number(el, "line", "cb")?,
        covered_instructions: required_number(el, "line", "ci")?,
    })
}

/// Read the direct `<counter>` children of a node.
fn parse_counters(el: &XmlElement) -> Result<Counters> {
    let mut counters = Counters::new();
    for counter in el.children_named("counter") {
        let type_name = required(counter, "counter", "type")?;
        let covered: u64 = required_number(counter, "counter", "covered")?;
        let missed: u64 = required_number(counter, "counter", "missed")?;
        if covered.checked_add(missed).is_none() {
            return Err(CobertifyError::InvalidAttribute {
                element: "counter",
                attribute: "missed",
                value: missed.to_string(),
            });
        }

        match CounterKind::from_type(type_name) {
            Some(kind) => counters.insert(Counter {
                kind,
                covered,
                missed,
            }),
            None => log::debug!("ignoring unknown counter type '{}' on <{}>", type_name, el.name),
        }
    }
    Ok(counters)
}

fn required<'a>(
    el: &'a XmlElement,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str> {
    el.attr(attribute)
        .ok_or(CobertifyError::MissingAttribute { element, attribute })
}

fn required_number<T: FromStr>(
    el: &XmlElement,
    element: &'static str,
    attribute: &'static str,
) -> Result<T> {
    let value = required(el, element, attribute)?;
    parse_number(value, element, attribute)
}

fn optional_number<T: FromStr>(
    el: &XmlElement,
    element: &'static str,
    attribute: &'static str,
) -> Result<Option<T>> {
    el.attr(attribute)
        .map(|value| parse_number(value, element, attribute))
        .transpose()
}

fn parse_number<T: FromStr>(value: &str, element: &'static str, attribute: &'static str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CobertifyError::InvalidAttribute {
            element,
            attribute,
            value: value.to_string(),
        })
}
