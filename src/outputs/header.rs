//! Opening markup derived from the `<channel>` element.

use std::fmt::Write;

use tracing::debug;

use super::{NO_DESCRIPTION, NO_TITLE, anchor, child_by_tag, expect_tag};
use crate::error::FeedError;
use crate::models::{XmlNode, first_child_label};

/// Write the "opening" part of the page for `channel`.
///
/// Emits `<html>`, the head with the page title, an `<h1>` linking to the
/// channel's `<link>`, the channel description and the table header row.
///
/// The page `<title>` carries the label of the channel's `<title>` element
/// (the literal word `title`) when that element has text, and [`NO_TITLE`]
/// otherwise. The heading shows the actual title text. An absent or empty
/// `<title>` or `<description>` falls back to [`NO_TITLE`] / [`NO_DESCRIPTION`].
///
/// # Errors
///
/// - [`FeedError::UnexpectedElement`] if `channel` is not a `<channel>` tag
/// - [`FeedError::MissingElement`] if `<link>` is absent
/// - [`FeedError::EmptyElement`] if `<link>` has no text
pub fn output_header<N, W>(channel: &N, out: &mut W) -> Result<(), FeedError>
where
    N: XmlNode,
    W: Write,
{
    expect_tag(channel, "channel")?;

    let (page_title, heading) = child_by_tag(channel, "title")
        .and_then(|title| Some((title.label(), first_child_label(title)?)))
        .unwrap_or((NO_TITLE, NO_TITLE));

    let link = child_by_tag(channel, "link").ok_or_else(|| FeedError::missing("channel", "link"))?;
    let href = first_child_label(link).ok_or_else(|| FeedError::EmptyElement {
        tag: "link".to_string(),
    })?;

    let description = child_by_tag(channel, "description")
        .and_then(first_child_label)
        .unwrap_or(NO_DESCRIPTION);

    debug!(%heading, %href, "Rendering channel header");

    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<title>{page_title}</title>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>{}</h1>", anchor(href, heading))?;
    writeln!(out, "<p>{description}</p>")?;
    writeln!(out, "<table border=\"1\">")?;
    writeln!(out, "<tr>")?;
    writeln!(out, "<th>date</th>")?;
    writeln!(out, "<th>source</th>")?;
    writeln!(out, "<th>News</th>")?;
    writeln!(out, "</tr>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::XmlTree;

    fn channel(title: XmlTree, description: XmlTree) -> XmlTree {
        XmlTree::tag("channel")
            .with_child(title)
            .with_child(XmlTree::element("link", "http://x"))
            .with_child(description)
    }

    fn render(channel: &XmlTree) -> Result<String, FeedError> {
        let mut out = String::new();
        output_header(channel, &mut out)?;
        Ok(out)
    }

    #[test]
    fn test_header_with_title_and_description() {
        let html = render(&channel(
            XmlTree::element("title", "My Feed"),
            XmlTree::element("description", "Desc"),
        ))
        .unwrap();

        assert!(html.starts_with("<html>\n<head>\n"));
        assert!(html.contains("<title>title</title>"));
        assert!(html.contains(r#"<h1><a href="http://x">My Feed</a></h1>"#));
        assert!(html.contains("<p>Desc</p>"));
        assert!(html.ends_with("<th>date</th>\n<th>source</th>\n<th>News</th>\n</tr>\n"));
    }

    #[test]
    fn test_header_empty_title_falls_back() {
        let html = render(&channel(
            XmlTree::tag("title"),
            XmlTree::element("description", "Desc"),
        ))
        .unwrap();

        assert!(html.contains("<title>No Title</title>"));
        assert!(html.contains(r#"<a href="http://x">No Title</a>"#));
    }

    #[test]
    fn test_header_empty_description_falls_back() {
        let html = render(&channel(
            XmlTree::element("title", "My Feed"),
            XmlTree::tag("description"),
        ))
        .unwrap();

        assert!(html.contains("<p>no description</p>"));
    }

    #[test]
    fn test_header_absent_title_falls_back() {
        let channel = XmlTree::tag("channel")
            .with_child(XmlTree::element("link", "http://x"))
            .with_child(XmlTree::element("description", "Desc"));
        let html = render(&channel).unwrap();

        assert!(html.contains("<title>No Title</title>"));
        assert!(html.contains(r#"<h1><a href="http://x">No Title</a></h1>"#));
        assert!(html.contains("<p>Desc</p>"));
    }

    #[test]
    fn test_header_absent_description_falls_back() {
        let channel = XmlTree::tag("channel")
            .with_child(XmlTree::element("title", "T"))
            .with_child(XmlTree::element("link", "http://x"))
            .with_child(XmlTree::tag("item"));
        let html = render(&channel).unwrap();

        assert!(html.contains("<title>title</title>"));
        assert!(html.contains("<p>no description</p>"));
    }

    #[test]
    fn test_header_uses_first_matching_children() {
        let channel = XmlTree::tag("channel")
            .with_child(XmlTree::element("link", "http://first"))
            .with_child(XmlTree::element("title", "First"))
            .with_child(XmlTree::element("description", "D"))
            .with_child(XmlTree::element("title", "Second"))
            .with_child(XmlTree::element("link", "http://second"));
        let html = render(&channel).unwrap();

        assert!(html.contains(r#"<a href="http://first">First</a>"#));
        assert!(!html.contains("Second"));
    }

    #[test]
    fn test_header_missing_link_is_an_error() {
        let channel = XmlTree::tag("channel")
            .with_child(XmlTree::element("title", "My Feed"))
            .with_child(XmlTree::element("description", "Desc"));
        let err = render(&channel).unwrap_err();

        assert!(matches!(
            err,
            FeedError::MissingElement { ref parent, ref tag } if parent == "channel" && tag == "link"
        ));
    }

    #[test]
    fn test_header_empty_link_is_an_error() {
        let channel = XmlTree::tag("channel")
            .with_child(XmlTree::element("title", "My Feed"))
            .with_child(XmlTree::tag("link"))
            .with_child(XmlTree::element("description", "Desc"));

        assert!(matches!(
            render(&channel).unwrap_err(),
            FeedError::EmptyElement { ref tag } if tag == "link"
        ));
    }

    #[test]
    fn test_header_rejects_non_channel() {
        let item = XmlTree::tag("item").with_child(XmlTree::element("title", "T"));
        assert!(matches!(
            render(&item).unwrap_err(),
            FeedError::UnexpectedElement { expected: "channel", .. }
        ));
    }

    #[test]
    fn test_header_writes_nothing_on_error() {
        let mut out = String::new();
        let channel = XmlTree::tag("channel").with_child(XmlTree::element("title", "T"));
        // no <link>
        assert!(output_header(&channel, &mut out).is_err());
        assert!(out.is_empty());
    }
}
