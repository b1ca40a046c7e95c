//! # RSS to HTML
//!
//! Turns an RSS 2.0 feed into a single HTML page: a heading built from the
//! channel's title, link and description, then a table with one row per news
//! item (publication date, source, linked headline).
//!
//! ## Architecture
//!
//! 1. **Loading** ([`fetch`]): read the feed from an http(s) URL (with retry)
//!    or a local file
//! 2. **Parsing** ([`feed`]): build a generic [`models::XmlTree`]
//! 3. **Validation** ([`convert`]): require `<rss version="2.0">`
//! 4. **Rendering** ([`outputs`]): header, one row per `<item>`, footer
//!
//! Rendering is written against the read-only [`models::XmlNode`] trait and
//! any [`std::fmt::Write`] sink, so it is independent of both the parser and
//! the destination.
//!
//! Missing optional fields never stop rendering; each one has a fixed
//! fallback text (see [`outputs`]). A channel without its mandatory
//! elements is reported as a [`error::FeedError`] instead.

pub mod cli;
pub mod convert;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod utils;

pub use convert::{INVALID_FEED_MESSAGE, Outcome, convert_to_file, feed_to_html, render_feed, validate_rss};
pub use error::FeedError;
pub use feed::parse_feed;
pub use models::{XmlNode, XmlTree, find_child};
