//! Fragment extractors shared by both log formats
//!
//! - JSON object capture (`{ ... }`)
//! - Bracketed timestamp (`[ ... ]`)
//! - Name marker (`===name===`)

use crate::config::BraceCapture;
use regex::Regex;
use std::sync::LazyLock;

/// First `[ ... ]` on a single line, shortest match
static TIMESTAMP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("Invalid timestamp regex"));

/// First `===name===` on a single line, shortest match
static MARKER_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"===(.*?)===").expect("Invalid marker name regex"));

/// Capture the JSON object fragment of `text` using the given strategy
pub fn capture_object(text: &str, capture: BraceCapture) -> Option<&str> {
    match capture {
        BraceCapture::Greedy => capture_greedy(text),
        BraceCapture::Balanced => capture_balanced(text),
    }
}

/// First `{` to last `}`, spanning newlines
///
/// Nesting is not checked, so two separate objects in one span are captured
/// together with whatever lies between them.
pub fn capture_greedy(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// The object opened by the first `{`, closed at its matching `}`
///
/// Braces inside JSON strings are ignored. Returns `None` if the first object
/// never closes.
pub fn capture_balanced(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Text between the first `[` and the next `]` on the same line
///
/// `[]` yields `Some("")`.
pub fn captured_timestamp(text: &str) -> Option<&str> {
    TIMESTAMP_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Name inside the first `===name===` marker, trimmed
///
/// A blank name counts as no marker.
pub fn marker_name(text: &str) -> Option<&str> {
    MARKER_NAME_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
}
