//! Generic XML tree reader.
//!
//! The whole document is materialized into a tree of [`XmlElement`]s with
//! string attributes before any interpretation happens. Format-specific
//! validation lives in [`crate::parsers`].

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{CobertifyError, Result};

/// One element of a parsed XML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    /// Attributes in document order, values already unescaped.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    /// Concatenated text content directly inside this element.
    pub text: String,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Value of the first attribute called `key`.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct children with the given element name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First direct child with the given element name.
    #[must_use]
    pub fn first_child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Parse a complete XML document and return its root element.
///
/// Fails on malformed markup, on a document without a root element, and on
/// a document that ends while elements are still open.
pub fn parse_document(input: &[u8]) -> Result<XmlElement> {
    let mut reader = Reader::from_reader(input);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Err(e) => return Err(xml_err(e, &reader)),
            Ok(Event::Eof) => break,
            Ok(Event::Start(ref e)) => {
                stack.push(element_from(e, &reader)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = element_from(e, &reader)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(ref e)) => {
                let element = stack.pop().ok_or_else(|| {
                    CobertifyError::Parse(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(ref e)) => {
                // Text outside the root element carries no information.
                if let Some(current) = stack.last_mut() {
                    let text = e.unescape().map_err(|err| xml_err(err, &reader))?;
                    current.text.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(e));
                }
            }
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(CobertifyError::Parse(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| CobertifyError::Parse("document has no root element".to_string()))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(CobertifyError::Parse(format!(
                "second root element <{}>",
                element.name
            )));
        }
        None => *root = Some(element),
    }
    Ok(())
}

fn element_from<R>(start: &BytesStart, reader: &Reader<R>) -> Result<XmlElement> {
    let mut element = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| xml_err(e.into(), reader))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| xml_err(e, reader))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn xml_err<R>(source: quick_xml::Error, reader: &Reader<R>) -> CobertifyError {
    CobertifyError::Xml {
        source,
        position: reader.buffer_position(),
    }
}
