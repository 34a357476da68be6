//! Utility functions for date formatting, string handling, and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Publication date formatting for cards
//! - HTML escaping for rendered pages
//! - String truncation and slugification for logging and file names
//! - File system validation for output directories

use chrono::{DateTime, Utc};
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Shown in place of a date that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Format an RFC 3339 timestamp as `Mon D, YYYY` (en-US, in UTC).
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_publication_date("2025-05-06T14:30:00Z"), "May 6, 2025");
/// ```
pub fn format_publication_date(date: &str) -> String {
    match DateTime::parse_from_rfc3339(date.trim()) {
        Ok(dt) => dt.with_timezone(&Utc).format("%b %-d, %Y").to_string(),
        Err(e) => {
            debug!(%date, error = %e, "Unparseable publication date");
            INVALID_DATE.to_string()
        }
    }
}

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (on a character
/// boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let head = truncate_on_char_boundary(s, max);
    if head.len() == s.len() {
        return s.to_string();
    }
    format!("{}…(+{} bytes)", head, s.len() - head.len())
}

/// Longest prefix of `s` that is at most `max` bytes and ends on a
/// character boundary.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_on_char_boundary("ééé", 3), "é");
/// ```
pub fn truncate_on_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    &s[..cut]
}

/// Convert a title to a file-name friendly slug.
///
/// Lowercases the text, removes special characters, and replaces
/// spaces with hyphens.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify_title("Hello World"), "hello-world");
/// assert_eq!(slugify_title("Test-Article!"), "test-article");
/// ```
pub fn slugify_title(title: &str) -> String {
    title
        .to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "")
        .replace(' ', "-")
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a scratch file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let scratch_path = format!("{}/..__write_check__", path.trim_end_matches('/'));
    match stdfs::File::create(&scratch_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&scratch_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
