//! HTML generation for a parsed RSS channel.
//!
//! The page is produced in three parts, each written into a
//! [`std::fmt::Write`] sink:
//!
//! # Submodules
//!
//! - [`header`]: `<html>` through the table's header row, from the `<channel>`
//! - [`item`]: one `<tr>` per `<item>`
//! - [`footer`]: closes the table and the document
//!
//! # Page Structure
//!
//! ```text
//! <html>
//! <head>
//! <title>title</title>
//! </head>
//! <body>
//! <h1><a href="CHANNEL LINK">CHANNEL TITLE</a></h1>
//! <p>CHANNEL DESCRIPTION</p>
//! <table border="1">
//! <tr> date | source | News </tr>
//! <tr> ... one row per item ... </tr>
//! </table>
//! </body>
//! </html>
//! ```
//!
//! Nothing is HTML-escaped; feed text is written as-is.

pub mod footer;
pub mod header;
pub mod item;

use crate::error::FeedError;
use crate::models::{XmlNode, find_child};

/// Heading and page title when the channel `<title>` is empty.
pub const NO_TITLE: &str = "No Title";
/// Paragraph text when the channel `<description>` is empty.
pub const NO_DESCRIPTION: &str = "no description";
/// Date cell when an item has no `<pubDate>`.
pub const NO_PUBDATE: &str = "pubdate doesn't exist";
/// Source cell when an item has no `<source>`.
pub const NO_SOURCE: &str = "No source available";
/// Source link text when `<source url="...">` is empty.
pub const NO_SOURCE_LABEL: &str = "No label exist";
/// News link text when an item has neither a usable title nor description.
pub const NO_NEWS: &str = "no title or description";

/// `<a href="href">text</a>`
pub(crate) fn anchor(href: &str, text: &str) -> String {
    format!("<a href=\"{href}\">{text}</a>")
}

/// Fails unless `node` is a tag node labeled `expected`.
pub(crate) fn expect_tag<N: XmlNode>(node: &N, expected: &'static str) -> Result<(), FeedError> {
    if node.is_tag() && node.label() == expected {
        Ok(())
    } else {
        Err(FeedError::UnexpectedElement {
            expected,
            found: node.label().to_string(),
        })
    }
}

/// First direct child of `node` labeled `tag`.
pub(crate) fn child_by_tag<'a, N: XmlNode>(node: &'a N, tag: &str) -> Option<&'a N> {
    find_child(node, tag).and_then(|index| node.child(index))
}
