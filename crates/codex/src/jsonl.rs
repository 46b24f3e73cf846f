use serde_json::Value;
use tracing::debug;
use wrapper_core::json::{display_value, first_str, str_at, u64_at};
use wrapper_core::{
    classify_line, discriminator, text_event, ErrorMarkers, LineShape, OutputEvent, UsageInfo,
};

use crate::items::item_event;

pub(crate) const THREAD_STARTED: &str = "thread.started";

const MARKERS: ErrorMarkers = ErrorMarkers {
    prefixes: &["error:", "ERROR "],
    substrings: &["stream error", "thread 'main' panicked"],
};

/// Pre-JSON builds printed the thread id as a plain banner line.
const LEGACY_SESSION_PREFIX: &str = "session id:";

type Handler = fn(&str, &Value) -> OutputEvent;

const HANDLERS: &[(&str, Handler)] = &[
    ("thread.started", thread_started),
    ("thread.resumed", thread_started),
    ("turn.started", turn_started),
    ("turn.completed", turn_completed),
    ("turn.failed", turn_failed),
    ("item.started", item_event),
    ("item.updated", item_event),
    ("item.completed", item_event),
    ("error", top_level_error),
];

/// Normalizes one line of `codex exec --json` output.
pub fn parse_jsonl_line(line: &str) -> Option<OutputEvent> {
    match classify_line(line) {
        LineShape::Blank => None,
        LineShape::Text(text) => Some(match legacy_session_id(text) {
            Some(id) => OutputEvent::new(THREAD_STARTED)
                .title("Session started")
                .session_id(id),
            None => text_event(text, &MARKERS),
        }),
        LineShape::Malformed(text) => Some(text_event(text, &MARKERS)),
        LineShape::Json { line, value } => Some(parse_document(&value).raw_json(line)),
    }
}

fn legacy_session_id(text: &str) -> Option<&str> {
    let head = text.get(..LEGACY_SESSION_PREFIX.len())?;
    if !head.eq_ignore_ascii_case(LEGACY_SESSION_PREFIX) {
        return None;
    }
    let id = text[LEGACY_SESSION_PREFIX.len()..].trim();
    (!id.is_empty()).then_some(id)
}

fn parse_document(value: &Value) -> OutputEvent {
    let Some(tag) = discriminator(value) else {
        return OutputEvent::unknown(None, "");
    };
    match HANDLERS.iter().find(|(name, _)| *name == tag) {
        Some((_, handler)) => handler(tag, value),
        None => {
            debug!(adapter = "codex", tag, "unrecognized jsonl event");
            OutputEvent::unknown(Some(tag), "")
        }
    }
}

fn thread_started(_tag: &str, value: &Value) -> OutputEvent {
    OutputEvent::new(THREAD_STARTED)
        .title("Session started")
        .maybe_session_id(
            first_str(value, &["thread_id", "session_id", "id"]).map(str::to_string),
        )
}

fn turn_started(tag: &str, _value: &Value) -> OutputEvent {
    OutputEvent::new(tag)
}

fn turn_completed(tag: &str, value: &Value) -> OutputEvent {
    let event = OutputEvent::new(tag);
    let Some(usage) = value.get("usage").filter(|usage| usage.is_object()) else {
        return event;
    };

    let usage = UsageInfo::new(
        u64_at(usage, "input_tokens").unwrap_or(0),
        u64_at(usage, "output_tokens").unwrap_or(0),
    )
    .cached(u64_at(usage, "cached_input_tokens").unwrap_or(0));
    event
        .content(format!(
            "Tokens: {} in ({} cached) / {} out",
            usage.input_tokens, usage.cached_input_tokens, usage.output_tokens
        ))
        .usage(usage)
}

fn turn_failed(tag: &str, value: &Value) -> OutputEvent {
    let (message, content) = format_error(value.get("error"));
    OutputEvent::new(tag)
        .title("Turn failed")
        .content(content)
        .error(message)
        .unknown_marker()
}

fn top_level_error(tag: &str, value: &Value) -> OutputEvent {
    let source = value.get("error").unwrap_or(value);
    let (message, content) = format_error(Some(source));
    OutputEvent::new(tag)
        .title("Error")
        .content(content)
        .error(message)
}

/// Returns `(message, content)` where content appends a `Code:` line when one is present.
pub(crate) fn format_error(error: Option<&Value>) -> (String, String) {
    let (message, code) = match error {
        Some(Value::String(message)) if !message.trim().is_empty() => (message.clone(), None),
        Some(error @ Value::Object(_)) => (
            first_str(error, &["message", "error"])
                .map(str::to_string)
                .unwrap_or_else(|| "Unknown error".to_string()),
            code_at(error),
        ),
        Some(other) if !other.is_null() => (display_value(other), None),
        _ => ("Unknown error".to_string(), None),
    };

    let content = match &code {
        Some(code) => format!("{message}\nCode: {code}"),
        None => message.clone(),
    };
    (message, content)
}

fn code_at(value: &Value) -> Option<String> {
    match value.get("code")? {
        Value::String(_) => str_at(value, "code").map(str::to_string),
        Value::Number(code) => Some(code.to_string()),
        _ => None,
    }
}
