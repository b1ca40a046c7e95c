//! Error type shared by feed loading, parsing and rendering.
//!
//! Two families live here. Load and parse failures (`Http`, `Io`, `Xml`, ...)
//! come from the outside world. The element variants (`MissingElement`,
//! `EmptyElement`, `UnexpectedElement`) report a feed that breaks a renderer
//! precondition; rendering stops at the first one and nothing is written.
//!
//! [`FeedError::InvalidFeed`] is the only variant the driver treats as a
//! user-facing diagnostic rather than a failure.

use std::str::Utf8Error;

/// Everything that can go wrong between reading a feed and emitting HTML.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, non-success status).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Local file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Tag or text bytes were not valid in the document encoding.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Malformed attribute list on a tag.
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Unresolvable character reference such as `&#xZZ;`.
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// CDATA section was not UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] Utf8Error),

    /// Writing into the output sink failed.
    #[error("failed to write HTML output")]
    Fmt(#[from] std::fmt::Error),

    /// The document contained no element at all.
    #[error("document has no root element")]
    EmptyDocument,

    /// Input ended while `tag` was still open.
    #[error("document ends inside <{tag}>")]
    UnexpectedEof { tag: String },

    /// Root is not `<rss version="2.0">`.
    #[error("not an RSS 2.0 feed (root <{label}>, version {version:?})")]
    InvalidFeed {
        label: String,
        version: Option<String>,
    },

    /// A mandatory child element is absent.
    #[error("<{parent}> has no <{tag}> element")]
    MissingElement { parent: String, tag: String },

    /// A mandatory element has no text.
    #[error("<{tag}> is empty")]
    EmptyElement { tag: String },

    /// A renderer was handed the wrong kind of node.
    #[error("expected <{expected}>, found {found:?}")]
    UnexpectedElement {
        expected: &'static str,
        found: String,
    },
}

impl FeedError {
    pub(crate) fn missing(parent: &str, tag: &str) -> Self {
        FeedError::MissingElement {
            parent: parent.to_string(),
            tag: tag.to_string(),
        }
    }

    /// `true` when the input simply is not an RSS 2.0 document.
    pub fn is_invalid_feed(&self) -> bool {
        matches!(self, FeedError::InvalidFeed { .. })
    }
}
