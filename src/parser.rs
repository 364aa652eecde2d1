//! XML document parser.
//!
//! Builds an [`XmlElement`] tree from document text using quick-xml's
//! event reader with an explicit element stack. Only the structure the
//! comparator needs is kept: tag names, attributes, and direct text.
//! Comments, processing instructions, and the XML declaration are skipped;
//! namespace prefixes are treated as part of the tag name.

use crate::model::XmlElement;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Errors produced while parsing one document.
///
/// The message text is surfaced verbatim in `Parse error` difference
/// records, so each variant carries enough detail to diagnose the document
/// without re-parsing it.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("syntax error at position {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("malformed attribute at position {position}: {message}")]
    Attribute { position: u64, message: String },

    #[error("no root element found")]
    NoRoot,

    #[error("content after document element at position {position}")]
    TrailingContent { position: u64 },
}

/// Parse document text into an element tree.
///
/// Returns the root element of a well-formed document, or the first error
/// encountered. An empty or whitespace-only input fails with
/// [`ParseError::NoRoot`]; a second top-level element fails with
/// [`ParseError::TrailingContent`].
pub fn parse_document(content: &str) -> Result<XmlElement, ParseError> {
    let mut reader = Reader::from_str(content);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(ParseError::TrailingContent { position });
                }
                stack.push(element_from_start(&start, position)?);
            }
            Ok(Event::Empty(start)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(ParseError::TrailingContent { position });
                }
                let element = element_from_start(&start, position)?;
                attach(element, &mut stack, &mut root);
            }
            Ok(Event::End(_)) => {
                // Mismatched end tags are rejected by the reader itself.
                if let Some(element) = stack.pop() {
                    attach(element, &mut stack, &mut root);
                }
            }
            Ok(Event::Text(text)) => {
                let unescaped = text.unescape().map_err(|e| ParseError::Syntax {
                    position,
                    message: e.to_string(),
                })?;
                append_direct_text(&unescaped, &mut stack, root.is_some(), position)?;
            }
            Ok(Event::CData(cdata)) => {
                let raw = String::from_utf8_lossy(&cdata).into_owned();
                append_direct_text(&raw, &mut stack, root.is_some(), position)?;
            }
            Ok(Event::Eof) => break,
            // Declaration, comments, PIs, doctype carry no comparable content.
            Ok(_) => {}
            Err(e) => {
                return Err(ParseError::Syntax {
                    position,
                    message: e.to_string(),
                })
            }
        }
    }

    root.ok_or(ParseError::NoRoot)
}

/// Build an element from a start (or empty-element) tag.
fn element_from_start(start: &BytesStart<'_>, position: u64) -> Result<XmlElement, ParseError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = XmlElement::new(tag);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| ParseError::Attribute {
            position,
            message: e.to_string(),
        })?;
        let name = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| ParseError::Attribute {
                position,
                message: e.to_string(),
            })?
            .into_owned();
        element.attributes.insert(name, value);
    }

    Ok(element)
}

/// Attach a completed element to its parent, or install it as the root.
fn attach(element: XmlElement, stack: &mut Vec<XmlElement>, root: &mut Option<XmlElement>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

/// Record character data as the enclosing element's direct text.
///
/// Direct text is the character data before the first child; text arriving
/// after a child (tail text) is not part of any snapshot and is dropped.
/// Non-whitespace text outside any element is ill-formed.
fn append_direct_text(
    text: &str,
    stack: &mut [XmlElement],
    have_root: bool,
    position: u64,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(current) => {
            if current.children.is_empty() {
                current.text.push_str(text);
            }
            Ok(())
        }
        None => {
            if text.trim().is_empty() {
                Ok(())
            } else if have_root {
                Err(ParseError::TrailingContent { position })
            } else {
                Err(ParseError::Syntax {
                    position,
                    message: "text before document element".to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_document() {
        let root = parse_document(r#"<order id="7"><item sku="1">A</item></order>"#)
            .expect("should parse");
        assert_eq!(root.tag, "order");
        assert_eq!(root.attributes.get("id").map(String::as_str), Some("7"));
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].tag, "item");
        assert_eq!(root.children[0].text, "A");
    }

    #[test]
    fn test_parse_empty_element() {
        let root = parse_document(r#"<order><note/></order>"#).expect("should parse");
        assert_eq!(root.children[0].tag, "note");
        assert!(root.children[0].text.is_empty());
        assert!(root.children[0].children.is_empty());
    }

    #[test]
    fn test_parse_direct_text_excludes_descendants() {
        let root =
            parse_document("<order>head<item>inner</item>tail</order>").expect("should parse");
        assert_eq!(root.text, "head");
        assert_eq!(root.children[0].text, "inner");
    }

    #[test]
    fn test_parse_unescapes_entities() {
        let root = parse_document(r#"<note kind="a&amp;b">x &lt; y</note>"#).expect("should parse");
        assert_eq!(root.attributes.get("kind").map(String::as_str), Some("a&b"));
        assert_eq!(root.text, "x < y");
    }

    #[test]
    fn test_parse_empty_input_fails() {
        assert!(matches!(parse_document(""), Err(ParseError::NoRoot)));
        assert!(matches!(parse_document("   \n"), Err(ParseError::NoRoot)));
    }

    #[test]
    fn test_parse_malformed_fails_with_message() {
        let err = parse_document("<order><item></order>").expect_err("should fail");
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_parse_second_root_fails() {
        let err = parse_document("<a/><b/>").expect_err("should fail");
        assert!(matches!(err, ParseError::TrailingContent { .. }));
    }

    #[test]
    fn test_parse_skips_declaration_and_comments() {
        let root = parse_document("<?xml version=\"1.0\"?><!-- hi --><order>ok</order>")
            .expect("should parse");
        assert_eq!(root.tag, "order");
        assert_eq!(root.text, "ok");
    }
}
