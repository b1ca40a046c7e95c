//! Utility functions for terminal prompts, input classification, output
//! naming and file system checks.
//!
//! This module provides helper functions used by the driver in `main` and
//! by [`crate::convert::convert_to_file`]:
//! - Interactive prompts for the feed location and output name
//! - Deciding whether a feed source is a URL or a local file
//! - Building the `.html` output path
//! - Validating that the output directory is writable
//! - Truncating feed previews for logging

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, instrument};
use url::Url;

/// Print `message` on stdout and read one trimmed line from stdin.
///
/// # Errors
///
/// Returns an error if stdout cannot be flushed or stdin is closed before a
/// line is read.
pub async fn prompt(message: &str) -> std::io::Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(message.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    let read = BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    if read == 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "stdin closed before a line was entered",
        ));
    }
    Ok(line.trim().to_string())
}

/// `true` when `source` parses as an `http` or `https` URL.
///
/// # Examples
///
/// ```ignore
/// assert!(is_remote("https://example.com/rss"));
/// assert!(!is_remote("feeds/local.xml"));
/// ```
pub fn is_remote(source: &str) -> bool {
    Url::parse(source)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Output path for the user-supplied name: `.html` is appended unless the
/// name already ends with it.
pub fn html_file_name(name: &str) -> PathBuf {
    if name.ends_with(".html") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}.html"))
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last character boundary at or before `max`
/// bytes and get a `"…(+N bytes)"` marker appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure the directory that will hold `file` exists and is writable.
///
/// The directory is created if missing, then checked by creating a fresh
/// file (never an existing one) and deleting it again.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
/// - The scratch file cannot be removed afterwards
#[instrument(level = "info", skip_all, fields(file = %file.display()))]
pub async fn ensure_writable_parent(file: &Path) -> std::io::Result<()> {
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).await?;

    let scratch_path = dir.join(scratch_file_name());
    let scratch = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&scratch_path)
        .await?;
    drop(scratch);
    fs::remove_file(&scratch_path).await?;

    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}

fn scratch_file_name() -> String {
    format!(".{}-{}.write-check", env!("CARGO_PKG_NAME"), std::process::id())
}
