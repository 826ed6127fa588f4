//! Lightweight metadata derived from Markdown sources.
//!
//! There is no front matter. Everything a listing needs comes from the text
//! itself or from the filesystem:
//!
//! - **Title**: the first non-blank line, if it is a level-1 heading
//!   (`# Title`). Anything else, including a heading further down, falls back
//!   to the filename stem. See [`extract_title`].
//! - **Body**: the detail page shows the title in its own `<h1>`, so a
//!   leading level-1 heading line is dropped from the Markdown before
//!   conversion. See [`strip_first_h1`].
//! - **Excerpt**: a plain-text summary for catalog cards. See [`excerpt`].
//! - **Date**: the source file's modification time as `YYYY-MM-DD`.
//! - **Image**: the first Markdown image reference, used as a fallback cover.

use chrono::{DateTime, Local};
use regex::Regex;
use std::sync::LazyLock;
use std::time::SystemTime;

/// Appended to truncated excerpts.
pub const ELLIPSIS: char = '…';

static H1_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s+(.*\S)\s*$").expect("valid regex"));

static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`\n]*`").expect("valid regex"));
static IMAGE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("valid regex"));
static LINK_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]\([^)]*\)").expect("valid regex"));
static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]*").expect("valid regex"));
static QUOTE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*>[ \t]*").expect("valid regex"));
static BULLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[-*+][ \t]+").expect("valid regex"));
static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\d+\.[ \t]+").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static FIRST_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\(\s*<?([^)\s>]+)").expect("valid regex"));

/// Title of a Markdown document.
///
/// Only the first non-blank line is considered: if it is a level-1 heading
/// its trimmed text is the title, otherwise `fallback` (trimmed) is.
pub fn extract_title(text: &str, fallback: &str) -> String {
    text.lines()
        .find(|line| !line.trim().is_empty())
        .and_then(|line| H1_LINE.captures(line))
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| fallback.trim().to_string())
}

/// Remove the leading level-1 heading, the line [`extract_title`] takes the
/// title from. Documents that do not open with one are returned unchanged,
/// so a `# comment` inside a code block further down is never touched.
pub fn strip_first_h1(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    match lines.iter().position(|line| !line.trim().is_empty()) {
        Some(i) if H1_LINE.is_match(lines[i]) => lines[..i]
            .iter()
            .chain(&lines[i + 1..])
            .copied()
            .collect::<Vec<_>>()
            .join("\n"),
        _ => text.to_string(),
    }
}

/// Plain-text summary of a Markdown document, at most `max_chars` characters.
///
/// Code (fenced and inline), images and links are removed outright; link
/// text is not kept. Line-leading heading, quote and list markers are
/// stripped and whitespace collapsed. Over-long results are cut to leave room
/// for [`ELLIPSIS`], with trailing whitespace trimmed before it.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let text = FENCED_CODE.replace_all(text, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = IMAGE_REF.replace_all(&text, "");
    let text = LINK_REF.replace_all(&text, "");
    let text = HEADING_MARKER.replace_all(&text, "");
    let text = QUOTE_MARKER.replace_all(&text, "");
    let text = BULLET_MARKER.replace_all(&text, "");
    let text = ORDERED_MARKER.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = text.trim();

    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    let mut out = kept.trim_end().to_string();
    out.push(ELLIPSIS);
    out
}

/// `YYYY-MM-DD` in the local time zone.
pub fn format_date(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y-%m-%d").to_string()
}

/// Target of the first `![alt](src)` image reference, if any.
pub fn first_image(text: &str) -> Option<String> {
    FIRST_IMAGE
        .captures(text)
        .map(|caps| caps[1].to_string())
}
