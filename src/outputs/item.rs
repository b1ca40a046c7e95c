//! One table row per `<item>`.
//!
//! Each of the three cells is decided on its own by a small function that
//! looks at the item and returns a [`Cell`]; [`process_item`] only frames
//! the row and writes whatever the cells came back as.
//!
//! # Fallbacks
//!
//! | Cell | Condition | Output |
//! |------|-----------|--------|
//! | date | no `<pubDate>` (or no text) | [`NO_PUBDATE`] |
//! | source | no `<source>` | [`NO_SOURCE`] |
//! | source | `<source>` without `url` | an unclosed `<td>` |
//! | source | `url` but no text | link labeled [`NO_SOURCE_LABEL`] |
//! | news | `<title>` present but empty, or no `<link>` | no cell at all |
//! | news | no `<title>`, description unusable | link to `""` labeled [`NO_NEWS`] |

use std::fmt::{self, Write};

use super::{NO_NEWS, NO_PUBDATE, NO_SOURCE, NO_SOURCE_LABEL, anchor, child_by_tag, expect_tag};
use crate::error::FeedError;
use crate::models::{XmlNode, first_child_label};

/// What a single field of an item renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    /// `<td>text</td>`
    Text(&'a str),
    /// `<td><a href="href">text</a></td>`
    Link { href: &'a str, text: &'a str },
    /// A lone `<td>` with no closing tag.
    Unclosed,
    /// Nothing is written.
    Omitted,
}

impl Cell<'_> {
    /// Write the cell followed by a newline. [`Cell::Omitted`] writes nothing.
    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        match self {
            Cell::Text(text) => writeln!(out, "<td>{text}</td>"),
            Cell::Link { href, text } => writeln!(out, "<td>{}</td>", anchor(href, text)),
            Cell::Unclosed => writeln!(out, "<td>"),
            Cell::Omitted => Ok(()),
        }
    }
}

/// Publication date cell.
pub fn date_cell<N: XmlNode>(item: &N) -> Cell<'_> {
    let date = child_by_tag(item, "pubDate").and_then(first_child_label);
    Cell::Text(date.unwrap_or(NO_PUBDATE))
}

/// Source cell: a link to the `url` attribute of `<source>`.
pub fn source_cell<N: XmlNode>(item: &N) -> Cell<'_> {
    let Some(source) = child_by_tag(item, "source") else {
        return Cell::Text(NO_SOURCE);
    };
    match source.attribute_value("url") {
        Some(href) => Cell::Link {
            href,
            text: first_child_label(source).unwrap_or(NO_SOURCE_LABEL),
        },
        None => Cell::Unclosed,
    }
}

/// News cell: the item title linked to the item link, falling back to the
/// description when there is no `<title>` element at all.
pub fn news_cell<N: XmlNode>(item: &N) -> Cell<'_> {
    let link = child_by_tag(item, "link");
    let href = || link.and_then(first_child_label).unwrap_or("");

    if let Some(title) = child_by_tag(item, "title") {
        return match first_child_label(title) {
            Some(text) if link.is_some() => Cell::Link { href: href(), text },
            _ => Cell::Omitted,
        };
    }

    let description = child_by_tag(item, "description").and_then(first_child_label);
    match description {
        Some(text) if link.is_some() => Cell::Link { href: href(), text },
        _ => Cell::Link {
            href: "",
            text: NO_NEWS,
        },
    }
}

/// Write one `<tr>` for `item`: date, source and news cells.
///
/// # Errors
///
/// [`FeedError::UnexpectedElement`] if `item` is not an `<item>` tag, or
/// [`FeedError::Fmt`] if the sink rejects a write.
pub fn process_item<N, W>(item: &N, out: &mut W) -> Result<(), FeedError>
where
    N: XmlNode,
    W: Write,
{
    expect_tag(item, "item")?;

    writeln!(out, "<tr>")?;
    for cell in [date_cell(item), source_cell(item), news_cell(item)] {
        cell.write_to(out)?;
    }
    writeln!(out, "</tr>")?;
    Ok(())
}
