use serde_json::Value;
use tracing::debug;

use crate::OutputEvent;

/// Shape of one trimmed output line, decided before any tool-specific parsing.
#[derive(Debug)]
pub enum LineShape<'a> {
    Blank,
    /// Does not start with `{` or `[`; never handed to the JSON decoder.
    Text(&'a str),
    /// Looked like JSON but failed to decode.
    Malformed(&'a str),
    Json { line: &'a str, value: Value },
}

pub fn classify_line(line: &str) -> LineShape<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineShape::Blank;
    }
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return LineShape::Text(trimmed);
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => LineShape::Json {
            line: trimmed,
            value,
        },
        Err(err) => {
            debug!(error = %err, "line looked like JSON but failed to decode");
            LineShape::Malformed(trimmed)
        }
    }
}

/// Plain-text markers that classify a non-JSON line as an error.
#[derive(Debug, Clone, Copy)]
pub struct ErrorMarkers {
    pub prefixes: &'static [&'static str],
    pub substrings: &'static [&'static str],
}

impl ErrorMarkers {
    pub const COMMON: ErrorMarkers = ErrorMarkers {
        prefixes: &["Error:", "ERROR:", "[ERROR]"],
        substrings: &[" ERROR ", " FATAL ", "fatal:"],
    };

    pub fn matches(&self, text: &str) -> bool {
        self.prefixes.iter().any(|prefix| text.starts_with(prefix))
            || self.substrings.iter().any(|needle| text.contains(needle))
    }
}

/// Passthrough event for text that is not structured output.
pub fn text_event(text: &str, tool_markers: &ErrorMarkers) -> OutputEvent {
    if ErrorMarkers::COMMON.matches(text) || tool_markers.matches(text) {
        OutputEvent::text_error(text)
    } else {
        OutputEvent::raw_text(text)
    }
}

/// The `type` discriminator of a decoded document, when present and a string.
pub fn discriminator(value: &Value) -> Option<&str> {
    value.get("type").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: ErrorMarkers = ErrorMarkers {
        prefixes: &[],
        substrings: &[],
    };

    #[test]
    fn blank_and_whitespace_lines_are_blank() {
        assert!(matches!(classify_line(""), LineShape::Blank));
        assert!(matches!(classify_line(" \t\r"), LineShape::Blank));
    }

    #[test]
    fn text_lines_never_reach_the_decoder() {
        assert!(matches!(classify_line("  hello {"), LineShape::Text("hello {")));
    }

    #[test]
    fn broken_json_is_malformed() {
        assert!(matches!(classify_line("{\"type\":"), LineShape::Malformed(_)));
        assert!(matches!(
            classify_line("[2024-01-01] started"),
            LineShape::Malformed(_)
        ));
    }

    #[test]
    fn common_markers_classify_errors() {
        assert!(text_event("Error: disk full", &NONE).is_error);
        assert!(text_event("2024-05-01T10:00:00Z ERROR codex_core: boom", &NONE).is_error);
        assert!(text_event("fatal: not a git repository", &NONE).is_error);
        let ev = text_event("compiling...", &NONE);
        assert_eq!(ev.event_type, "raw");
        assert!(!ev.is_error);
    }

    #[test]
    fn deeply_nested_json_degrades_instead_of_failing() {
        let deep = format!("{}{}", "[".repeat(400), "]".repeat(400));
        assert!(matches!(classify_line(&deep), LineShape::Malformed(_)));
    }
}
