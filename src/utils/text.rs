// src/utils/text.rs

//! Text helpers for terminal rendering.

use chrono::{DateTime, Utc};
use unicode_segmentation::UnicodeSegmentation;

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clamp `s` to at most `max` grapheme clusters, appending `…` when cut.
pub fn clamp(s: &str, max: usize) -> String {
    let normalized = normalize_whitespace(s);
    let graphemes: Vec<&str> = normalized.graphemes(true).collect();
    if graphemes.len() <= max {
        return normalized;
    }
    if max == 0 {
        return String::new();
    }
    let kept = graphemes[..max - 1].concat();
    format!("{}…", kept.trim_end())
}

/// Format an RFC 3339 timestamp with a chrono format string.
///
/// Unparseable input is returned unchanged.
pub fn format_timestamp(raw: &str, format: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => ts.with_timezone(&Utc).format(format).to_string(),
        Err(_) => raw.to_string(),
    }
}
