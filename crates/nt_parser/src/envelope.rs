use std::fmt::Display;

use lazy_static::lazy_static;
use nt_core::RawReport;
use regex::Regex;
use tracing::{debug, warn};

/// Type tags of response objects known to print their payload in a
/// `content="..."` field.
const WRAPPER_KINDS: &[&str] = &["TeamRunResponse", "RunResponse"];

const CONTENT_FIELD_MARKER: &str = "content=";

lazy_static! {
    // A double-quoted value where `\x` escapes are skipped over, so the match
    // ends on the first quote that is not escaped.
    static ref CONTENT_FIELD: Regex =
        Regex::new(r#"(?s)content="((?:[^"\\]|\\.)*)""#).expect("content field pattern is valid");
}

/// Returns the report text, taking the payload straight out of a typed
/// wrapper or falling back to [`unwrap_text`] for plain text.
pub fn unwrap_report(report: &RawReport) -> String {
    match report {
        RawReport::Text(text) => unwrap_text(text),
        RawReport::Wrapped { kind, content } => {
            debug!("Taking report content from {} wrapper", kind);
            content.clone()
        }
    }
}

/// Stringifies any value first, then unwraps it as text.
pub fn unwrap_display<T: Display + ?Sized>(raw: &T) -> String {
    unwrap_text(&raw.to_string())
}

/// Recovers the payload of a stringified response object.
///
/// Text without a wrapper tag comes back unchanged. When a tag is present
/// but no quoted `content` value can be found, the input is also returned
/// as is.
pub fn unwrap_text(raw: &str) -> String {
    if !has_wrapper_marker(raw) {
        return raw.to_string();
    }

    match extract_content(raw) {
        Some(content) => {
            debug!("Unwrapped {} bytes of report content", content.len());
            content
        }
        None => {
            warn!("Response wrapper found but its content field could not be read");
            raw.to_string()
        }
    }
}

fn has_wrapper_marker(raw: &str) -> bool {
    raw.contains(CONTENT_FIELD_MARKER)
        && WRAPPER_KINDS
            .iter()
            .any(|kind| raw.contains(&format!("{}(", kind)))
}

fn extract_content(raw: &str) -> Option<String> {
    let captures = CONTENT_FIELD.captures(raw)?;
    let value = captures.get(1)?.as_str();
    Some(unescape(value))
}

// Quotes first, then newlines, then backslashes.
fn unescape(value: &str) -> String {
    value
        .replace("\\\"", "\"")
        .replace("\\n", "\n")
        .replace("\\\\", "\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        let text = "### Politics\n1. **A**\n  C:\\path stays";
        assert_eq!(unwrap_text(text), text);
    }

    #[test]
    fn test_wrapped_content_is_unescaped() {
        let raw = r####"TeamRunResponse(content="### Sports\n1. **Win** \n [Read more](u) (S, 2024)", content_type='str')"####;
        assert_eq!(
            unwrap_text(raw),
            "### Sports\n1. **Win** \n [Read more](u) (S, 2024)"
        );
    }

    #[test]
    fn test_escaped_quotes_do_not_end_the_content() {
        let raw = r#"TeamRunResponse(content="He said \"go\"\nnow", event="done")"#;
        assert_eq!(unwrap_text(raw), "He said \"go\"\nnow");
    }

    #[test]
    fn test_escaped_backslash_is_restored() {
        let raw = r#"RunResponse(content="a \\ b")"#;
        assert_eq!(unwrap_text(raw), "a \\ b");
    }

    #[test]
    fn test_marker_without_quoted_content_falls_back() {
        let raw = "TeamRunResponse(content=None, metrics={})";
        assert_eq!(unwrap_text(raw), raw);
    }

    #[test]
    fn test_marker_mentioned_in_prose_is_not_a_wrapper() {
        let raw = "The TeamRunResponse type has a content=\"x\" field";
        assert_eq!(unwrap_text(raw), raw);
    }

    #[test]
    fn test_typed_wrapper_is_taken_directly() {
        let report = RawReport::wrapped("TeamRunResponse", "### Local News\n1. **Fair**");
        assert_eq!(unwrap_report(&report), "### Local News\n1. **Fair**");
    }

    #[test]
    fn test_stringified_wrapper_without_backslashes_round_trips() {
        let content = "### Business\n1. **Merger \"approved\"**\n   Summary";
        let report = RawReport::wrapped("TeamRunResponse", content);
        assert_eq!(unwrap_display(&report), content);
    }

    #[test]
    fn test_literal_backslash_n_does_not_survive_display() {
        let report = RawReport::wrapped("TeamRunResponse", "C:\\new path");
        assert_eq!(unwrap_display(&report), "C:\\\new path");
        assert_eq!(unwrap_report(&report), "C:\\new path");
    }

    #[test]
    fn test_plain_text_is_a_fixed_point() {
        let text = "1. **Title**\n[Read more](http://x) (Src, 2025)";
        let once = unwrap_text(text);
        assert_eq!(unwrap_text(&once), once);
    }
}
