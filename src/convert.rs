//! Whole-document conversion: validate the root, then header, items, footer.

use std::fmt::Write;
use std::path::Path;

use tokio::fs;
use tracing::{debug, error, info, instrument, warn};

use crate::error::FeedError;
use crate::feed::parse_feed;
use crate::models::XmlNode;
use crate::outputs::{footer::output_footer, header::output_header, item::process_item};
use crate::utils::{ensure_writable_parent, truncate_for_log};

/// Printed on stdout when the input is not `<rss version="2.0">`.
pub const INVALID_FEED_MESSAGE: &str = "invalid url";

/// Result of [`convert_to_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The page was written with this many item rows.
    Written(usize),
    /// The document is not an RSS 2.0 feed; nothing was written.
    Invalid,
}

/// Check that `root` is `<rss version="2.0">` and return its first child,
/// the channel.
///
/// # Errors
///
/// [`FeedError::InvalidFeed`] when the label or version is wrong, and
/// [`FeedError::MissingElement`] when a valid root has no children.
pub fn validate_rss<N: XmlNode>(root: &N) -> Result<&N, FeedError> {
    let version = root.attribute_value("version");
    if !(root.is_tag() && root.label() == "rss" && version == Some("2.0")) {
        return Err(FeedError::InvalidFeed {
            label: root.label().to_string(),
            version: version.map(str::to_string),
        });
    }
    root.child(0).ok_or_else(|| FeedError::missing("rss", "channel"))
}

/// Render the whole HTML page for an RSS document into `out`.
///
/// Only direct children of the channel labeled `item` become rows; items
/// nested any deeper are not searched for. Returns the number of rows written.
///
/// Nothing useful is left in `out` on error, so callers should render into a
/// scratch buffer and only persist it on success.
pub fn render_feed<N, W>(root: &N, out: &mut W) -> Result<usize, FeedError>
where
    N: XmlNode,
    W: Write,
{
    let channel = validate_rss(root)?;
    output_header(channel, out)?;

    let mut rows = 0usize;
    for item in channel
        .children()
        .filter(|child| child.is_tag() && child.label() == "item")
    {
        process_item(item, out)?;
        rows += 1;
    }
    debug!(rows, "Rendered item rows");

    output_footer(out)?;
    Ok(rows)
}

/// Render an RSS document into a fresh `String`.
#[instrument(level = "info", skip_all)]
pub fn feed_to_html<N: XmlNode>(root: &N) -> Result<String, FeedError> {
    let mut html = String::new();
    let rows = render_feed(root, &mut html)?;
    info!(rows, bytes = html.len(), "Rendered HTML page");
    Ok(html)
}

/// Parse `xml`, render it and write the page to `path`.
///
/// The file is only created once the whole page has rendered, so neither an
/// invalid feed nor a failed render leaves anything on disk.
///
/// # Errors
///
/// Parse failures, precondition violations from the renderers, and I/O
/// errors while writing. A non-RSS document is [`Outcome::Invalid`], not an
/// error.
#[instrument(level = "info", skip(xml), fields(bytes = xml.len(), path = %path.display()))]
pub async fn convert_to_file(xml: &[u8], path: &Path) -> Result<Outcome, FeedError> {
    let root = match parse_feed(xml) {
        Ok(root) => root,
        Err(e) => {
            error!(
                error = %e,
                preview = %truncate_for_log(&String::from_utf8_lossy(xml), 300),
                "Feed is not well-formed XML"
            );
            return Err(e);
        }
    };

    let mut html = String::new();
    let rows = match render_feed(&root, &mut html) {
        Ok(rows) => rows,
        Err(e) if e.is_invalid_feed() => {
            warn!(error = %e, "Rejected feed");
            return Ok(Outcome::Invalid);
        }
        Err(e) => {
            error!(error = %e, "Feed breaks a rendering precondition; nothing written");
            return Err(e);
        }
    };

    ensure_writable_parent(path).await?;
    fs::write(path, html).await?;
    info!(rows, "Wrote HTML page");
    Ok(Outcome::Written(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::XmlTree;

    fn channel() -> XmlTree {
        XmlTree::tag("channel")
            .with_child(XmlTree::element("title", "My Feed"))
            .with_child(XmlTree::element("link", "http://x"))
            .with_child(XmlTree::element("description", "Desc"))
    }

    fn rss(channel: XmlTree) -> XmlTree {
        XmlTree::tag("rss")
            .with_attribute("version", "2.0")
            .with_child(channel)
    }

    fn full_item() -> XmlTree {
        XmlTree::tag("item")
            .with_child(XmlTree::element("pubDate", "Mon"))
            .with_child(XmlTree::element("source", "Src").with_attribute("url", "http://s"))
            .with_child(XmlTree::element("title", "T"))
            .with_child(XmlTree::element("link", "http://i"))
    }

    #[test]
    fn test_round_trip_document() {
        let html = feed_to_html(&rss(channel().with_child(full_item()))).unwrap();

        let expected = "<html>\n\
            <head>\n\
            <title>title</title>\n\
            </head>\n\
            <body>\n\
            <h1><a href=\"http://x\">My Feed</a></h1>\n\
            <p>Desc</p>\n\
            <table border=\"1\">\n\
            <tr>\n\
            <th>date</th>\n\
            <th>source</th>\n\
            <th>News</th>\n\
            </tr>\n\
            <tr>\n\
            <td>Mon</td>\n\
            <td><a href=\"http://s\">Src</a></td>\n\
            <td><a href=\"http://i\">T</a></td>\n\
            </tr>\n\
            </table>\n\
            </body>\n\
            </html>\n";
        assert_eq!(html, expected);
    }

    #[test]
    fn test_no_items_still_closes_table() {
        let html = feed_to_html(&rss(channel())).unwrap();
        assert!(html.ends_with("<th>News</th>\n</tr>\n</table>\n</body>\n</html>\n"));
    }

    #[test]
    fn test_items_in_document_order_and_others_skipped() {
        let channel = channel()
            .with_child(XmlTree::tag("item").with_child(XmlTree::element("pubDate", "first")))
            .with_child(XmlTree::element("language", "en"))
            .with_child(XmlTree::tag("item").with_child(XmlTree::element("pubDate", "second")));
        let mut out = String::new();
        let rows = render_feed(&rss(channel), &mut out).unwrap();

        assert_eq!(rows, 2);
        let first = out.find("<td>first</td>").unwrap();
        let second = out.find("<td>second</td>").unwrap();
        assert!(first < second);
        assert!(!out.contains("<td>en</td>"));
    }

    #[test]
    fn test_text_reading_item_is_not_a_row() {
        let channel = channel()
            .with_child(XmlTree::text("item"))
            .with_child(full_item());
        let mut out = String::new();

        assert_eq!(render_feed(&rss(channel), &mut out).unwrap(), 1);
    }

    #[test]
    fn test_nested_items_are_not_found() {
        let channel = channel().with_child(XmlTree::tag("group").with_child(full_item()));
        let mut out = String::new();
        assert_eq!(render_feed(&rss(channel), &mut out).unwrap(), 0);
        assert!(!out.contains("<td>"));
    }

    #[test]
    fn test_wrong_root_label() {
        let feed = XmlTree::tag("feed")
            .with_attribute("version", "2.0")
            .with_child(channel());
        let mut out = String::new();
        let err = render_feed(&feed, &mut out).unwrap_err();

        assert!(err.is_invalid_feed());
        assert!(out.is_empty());
    }

    #[test]
    fn test_wrong_or_missing_version() {
        let old = XmlTree::tag("rss")
            .with_attribute("version", "0.91")
            .with_child(channel());
        assert!(feed_to_html(&old).unwrap_err().is_invalid_feed());

        let unversioned = XmlTree::tag("rss").with_child(channel());
        assert!(matches!(
            feed_to_html(&unversioned).unwrap_err(),
            FeedError::InvalidFeed { version: None, .. }
        ));
    }

    #[test]
    fn test_rss_without_channel() {
        let empty = XmlTree::tag("rss").with_attribute("version", "2.0");
        let err = feed_to_html(&empty).unwrap_err();
        assert!(!err.is_invalid_feed());
        assert!(matches!(err, FeedError::MissingElement { .. }));
    }

    #[test]
    fn test_first_child_is_taken_as_channel() {
        let root = XmlTree::tag("rss")
            .with_attribute("version", "2.0")
            .with_child(XmlTree::element("title", "not a channel"));
        assert!(matches!(
            feed_to_html(&root).unwrap_err(),
            FeedError::UnexpectedElement { expected: "channel", .. }
        ));
    }

    #[test]
    fn test_parsed_feed_end_to_end() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Example News</title>
    <link>https://news.example.com/</link>
    <description>Daily headlines</description>
    <item>
      <title>Launch day</title>
      <link>https://news.example.com/launch</link>
      <pubDate>Tue, 10 Jun 2025 04:00:00 GMT</pubDate>
    </item>
    <item>
      <description>Only a description</description>
      <link>https://news.example.com/desc</link>
      <source url="https://wire.example.com/">The Wire</source>
    </item>
  </channel>
</rss>"#;
        let root = parse_feed(xml.as_bytes()).unwrap();
        let html = feed_to_html(&root).unwrap();

        assert!(html.contains(r#"<h1><a href="https://news.example.com/">Example News</a></h1>"#));
        assert!(html.contains("<p>Daily headlines</p>"));
        assert!(html.contains("<td>Tue, 10 Jun 2025 04:00:00 GMT</td>"));
        assert!(html.contains(r#"<td><a href="https://news.example.com/launch">Launch day</a></td>"#));
        assert!(html.contains(r#"<td><a href="https://wire.example.com/">The Wire</a></td>"#));
        assert!(html.contains(
            r#"<td><a href="https://news.example.com/desc">Only a description</a></td>"#
        ));
        assert_eq!(html.matches("<tr>").count(), 3);
    }

    const VALID: &str = r#"<rss version="2.0"><channel>
<title>My Feed</title><link>http://x</link><description>Desc</description>
<item><pubDate>Mon</pubDate><title>T</title><link>http://i</link></item>
</channel></rss>"#;

    #[tokio::test]
    async fn test_convert_to_file_writes_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/news.html");

        let outcome = convert_to_file(VALID.as_bytes(), &path).await.unwrap();
        assert_eq!(outcome, Outcome::Written(1));

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<html>\n"));
        assert!(html.contains(r#"<td><a href="http://i">T</a></td>"#));
        assert!(html.ends_with("</html>\n"));
    }

    #[tokio::test]
    async fn test_convert_to_file_invalid_feed_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.html");

        let atom = br#"<feed version="2.0"><channel><title>T</title></channel></feed>"#;
        assert_eq!(convert_to_file(atom, &path).await.unwrap(), Outcome::Invalid);
        assert!(!path.exists());

        let old = br#"<rss version="0.91"><channel><title>T</title></channel></rss>"#;
        assert_eq!(convert_to_file(old, &path).await.unwrap(), Outcome::Invalid);
        assert!(!path.exists());

        assert_eq!(INVALID_FEED_MESSAGE, "invalid url");
    }

    #[tokio::test]
    async fn test_convert_to_file_missing_link_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.html");
        let xml = br#"<rss version="2.0"><channel><title>T</title></channel></rss>"#;

        let err = convert_to_file(xml, &path).await.unwrap_err();
        assert!(matches!(err, FeedError::MissingElement { ref tag, .. } if tag == "link"));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_convert_to_file_truncated_feed_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("news.html");
        let truncated = VALID.strip_suffix("</item>\n</channel></rss>").unwrap();

        let err = convert_to_file(truncated.as_bytes(), &path).await.unwrap_err();
        assert!(matches!(err, FeedError::UnexpectedEof { .. }));
        assert!(!path.exists());
    }
}
