//! Markup rendering of output trees, and parsing of embedded markup.
//!
//! Rendering trims surrounding whitespace from every text node and writes
//! elements without content as empty tags.

use std::fmt::Display;

use bon::Builder;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use thiserror::Error;

use crate::types::Element;

/// Errors raised while rendering or parsing markup.
#[derive(Debug, Error, PartialEq)]
pub enum XmlError {
    /// The writer failed.
    #[error("failed to write markup: {message}")]
    Write { message: String },

    /// Syntax error from the markup parser.
    #[error("markup syntax error at byte {position}: {message}")]
    Syntax { message: String, position: u64 },

    /// Markup contained no element.
    #[error("markup contains no element")]
    EmptyDocument,

    /// Markup contained more than one top-level element.
    #[error("markup contains more than one top-level element")]
    MultipleRoots,

    /// Markup ended inside an element.
    #[error("markup ended before closing tag </{tag}>")]
    Unclosed { tag: String },
}

fn write_error(err: impl Display) -> XmlError {
    XmlError::Write {
        message: err.to_string(),
    }
}

/// Rendering options.
///
/// # Example
///
/// ```
/// use dashbuilder::{Element, XmlOptions, to_xml_string};
///
/// let options = XmlOptions::builder().declaration(false).build();
/// let xml = to_xml_string(&Element::new("dashboard"), &options).unwrap();
/// assert_eq!(xml, "<dashboard/>");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct XmlOptions {
    /// Spaces per nesting level; zero renders everything on one line.
    #[builder(default = 2)]
    pub indent: usize,

    /// Whether to start with an `<?xml ...?>` declaration.
    #[builder(default = true)]
    pub declaration: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Render an element tree as markup text.
pub fn to_xml_string(element: &Element, options: &XmlOptions) -> Result<String, XmlError> {
    let mut writer = if options.indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', options.indent)
    } else {
        Writer::new(Vec::new())
    };

    if options.declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;
    }
    write_element(&mut writer, element)?;

    String::from_utf8(writer.into_inner()).map_err(write_error)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), XmlError> {
    let mut start = BytesStart::new(element.tag.as_str());
    for (name, value) in &element.attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    let text = normalized(element.text.as_deref());
    if text.is_none() && element.children.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(write_error)?;
    } else {
        writer.write_event(Event::Start(start)).map_err(write_error)?;
        if let Some(text) = text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(write_error)?;
        }
        for child in &element.children {
            write_element(writer, child)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(element.tag.as_str())))
            .map_err(write_error)?;
    }

    if let Some(tail) = normalized(element.tail.as_deref()) {
        writer
            .write_event(Event::Text(BytesText::new(tail)))
            .map_err(write_error)?;
    }
    Ok(())
}

fn normalized(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Parse a markup fragment with a single root element into an element tree.
///
/// Comments, processing instructions and declarations are dropped; text is
/// trimmed.
///
/// # Example
///
/// ```
/// use dashbuilder::parse_markup;
///
/// let html = parse_markup("<html><p>Hello <b>you</b> there</p></html>").unwrap();
/// let p = html.child("p").unwrap();
/// assert_eq!(p.text.as_deref(), Some("Hello"));
/// assert_eq!(p.child("b").and_then(|b| b.tail.as_deref()), Some("there"));
/// ```
pub fn parse_markup(markup: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text_start = true;
    reader.config_mut().trim_text_end = true;

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|err| XmlError::Syntax {
            message: err.to_string(),
            position: reader.error_position(),
        })?;

        match event {
            Event::Start(e) => stack.push(element_from_start(&e, reader.buffer_position())?),
            Event::Empty(e) => {
                let element = element_from_start(&e, reader.buffer_position())?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(element, &mut stack, &mut root)?;
                }
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(|err| XmlError::Syntax {
                    message: err.to_string(),
                    position: reader.buffer_position(),
                })?;
                append_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(e.as_ref()).to_string();
                append_text(&mut stack, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Unclosed {
            tag: open.tag.clone(),
        });
    }
    root.ok_or(XmlError::EmptyDocument)
}

fn element_from_start(start: &BytesStart<'_>, position: u64) -> Result<Element, XmlError> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).to_string());
    for attr in start.attributes() {
        let attr = attr.map_err(|err| XmlError::Syntax {
            message: err.to_string(),
            position,
        })?;
        let value = attr.unescape_value().map_err(|err| XmlError::Syntax {
            message: err.to_string(),
            position,
        })?;
        element.set_attribute(
            String::from_utf8_lossy(attr.key.as_ref()).to_string(),
            value.into_owned(),
        );
    }
    Ok(element)
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
    } else if root.is_some() {
        return Err(XmlError::MultipleRoots);
    } else {
        *root = Some(element);
    }
    Ok(())
}

/// Text goes to the open element, or to the tail of its last child.
fn append_text(stack: &mut [Element], text: &str) {
    if text.is_empty() {
        return;
    }
    let Some(open) = stack.last_mut() else {
        return;
    };
    let target = match open.children.last_mut() {
        Some(last) => &mut last.tail,
        None => &mut open.text,
    };
    match target {
        Some(existing) => {
            existing.push(' ');
            existing.push_str(text);
        }
        None => *target = Some(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_multiple_roots() {
        assert_eq!(parse_markup("<a/><b/>"), Err(XmlError::MultipleRoots));
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert_eq!(parse_markup("  "), Err(XmlError::EmptyDocument));
    }

    #[test]
    fn parse_rejects_unclosed_elements() {
        assert!(parse_markup("<html><p>").is_err());
    }

    #[test]
    fn parse_keeps_attributes_in_order() {
        let root = parse_markup(r#"<a href="x" class="y">link</a>"#).unwrap();
        let names: Vec<&str> = root.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["href", "class"]);
        assert_eq!(root.text.as_deref(), Some("link"));
    }

    #[test]
    fn normalized_drops_blank_text() {
        assert_eq!(normalized(Some("  \n ")), None);
        assert_eq!(normalized(Some(" hi ")), Some("hi"));
        assert_eq!(normalized(None), None);
    }
}
