//! Build an [`XmlTree`] from raw feed bytes.
//!
//! The parser is a thin recursive walk over `quick-xml` events:
//!
//! - the first element becomes the root; anything after it is ignored
//! - declarations, comments, processing instructions and doctypes are skipped
//! - text, CDATA and entity references that sit next to each other become a
//!   single text node, trimmed; whitespace-only runs produce no node
//! - qualified names are kept verbatim (`atom:link` stays `atom:link`)

use std::borrow::Cow;
use std::io::BufRead;

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::{debug, instrument};

use crate::error::FeedError;
use crate::models::XmlTree;

/// Parse a whole document and return its root element.
///
/// # Errors
///
/// Returns an error for malformed XML, undecodable names or text, bad
/// attributes, or a document with no element at all.
#[instrument(level = "debug", skip_all, fields(bytes = xml.len()))]
pub fn parse_feed(xml: &[u8]) -> Result<XmlTree, FeedError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let (name, attributes) = decode_start(&reader, &e)?;
                let children = parse_children(&mut reader, &name)?;
                debug!(root = %name, children = children.len(), "Parsed feed document");
                return Ok(XmlTree::Tag {
                    name,
                    attributes,
                    children,
                });
            }
            Event::Empty(e) => {
                let (name, attributes) = decode_start(&reader, &e)?;
                return Ok(XmlTree::Tag {
                    name,
                    attributes,
                    children: Vec::new(),
                });
            }
            Event::Eof => return Err(FeedError::EmptyDocument),
            // prolog: declaration, doctype, comments, stray whitespace
            _ => {}
        }
        buf.clear();
    }
}

/// Read events until the end tag of `tag` and collect its children.
///
/// Running out of input first is an error: the document was cut short.
fn parse_children<R: BufRead>(reader: &mut Reader<R>, tag: &str) -> Result<Vec<XmlTree>, FeedError> {
    let mut buf = Vec::new();
    let mut children = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                flush_text(&mut text, &mut children);
                let (name, attributes) = decode_start(reader, &e)?;
                let grandchildren = parse_children(reader, &name)?;
                children.push(XmlTree::Tag {
                    name,
                    attributes,
                    children: grandchildren,
                });
            }
            Event::Empty(e) => {
                flush_text(&mut text, &mut children);
                let (name, attributes) = decode_start(reader, &e)?;
                children.push(XmlTree::Tag {
                    name,
                    attributes,
                    children: Vec::new(),
                });
            }
            Event::Text(e) => {
                text.push_str(&reader.decoder().decode(&e)?);
            }
            Event::CData(e) => {
                text.push_str(std::str::from_utf8(&e)?);
            }
            Event::GeneralRef(e) => {
                text.push_str(&resolve_reference(reader, &e)?);
            }
            Event::End(_) => {
                flush_text(&mut text, &mut children);
                return Ok(children);
            }
            Event::Eof => {
                return Err(FeedError::UnexpectedEof {
                    tag: tag.to_string(),
                });
            }
            _ => {}
        }
        buf.clear();
    }
}

fn flush_text(text: &mut String, children: &mut Vec<XmlTree>) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        children.push(XmlTree::text(trimmed));
    }
    text.clear();
}

type Attributes = Vec<(String, String)>;

fn decode_start<R>(reader: &Reader<R>, e: &BytesStart) -> Result<(String, Attributes), FeedError> {
    let name = reader.decoder().decode(e.name().as_ref())?.into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let value = attr.decode_and_unescape_value(reader.decoder())?.into_owned();
        attributes.push((key, value));
    }
    Ok((name, attributes))
}

/// `&#38;` and `&amp;` resolve; unknown entities are kept as written.
fn resolve_reference<R>(reader: &Reader<R>, e: &BytesRef) -> Result<Cow<'static, str>, FeedError> {
    if let Some(ch) = e.resolve_char_ref()? {
        return Ok(Cow::Owned(ch.to_string()));
    }
    let name = reader.decoder().decode(e)?;
    Ok(match resolve_predefined_entity(&name) {
        Some(resolved) => Cow::Borrowed(resolved),
        None => Cow::Owned(format!("&{name};")),
    })
}
