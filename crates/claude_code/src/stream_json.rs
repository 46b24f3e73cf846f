use serde_json::Value;
use tracing::debug;
use wrapper_core::json::{bool_at, display_value, f64_at, first_str, str_at, u64_at};
use wrapper_core::{
    classify_line, discriminator, text_event, ErrorMarkers, LineShape, OutputEvent,
};

use crate::content::{content_event, tool_result_event, tool_use_event, usage_from};

/// Session id field names, in the order the CLI versions have used them.
const SESSION_ID_KEYS: &[&str] = &["session_id", "sessionId", "session", "id"];

const MARKERS: ErrorMarkers = ErrorMarkers {
    prefixes: &["error:", "API Error"],
    substrings: &["API Error:", "Invalid API key"],
};

type Handler = fn(&Value) -> OutputEvent;

const HANDLERS: &[(&str, Handler)] = &[
    ("init", parse_init),
    ("system", parse_system),
    ("message", parse_message),
    ("assistant", parse_role_message),
    ("user", parse_role_message),
    ("tool_use", tool_use_event),
    ("tool_result", tool_result_event),
    ("result", parse_result),
    ("error", parse_error),
];

/// Normalizes one line of `--output-format=stream-json` output.
pub fn parse_stream_json_line(line: &str) -> Option<OutputEvent> {
    match classify_line(line) {
        LineShape::Blank => None,
        LineShape::Text(text) | LineShape::Malformed(text) => Some(text_event(text, &MARKERS)),
        LineShape::Json { line, value } => Some(parse_document(&value).raw_json(line)),
    }
}

fn parse_document(value: &Value) -> OutputEvent {
    match discriminator(value) {
        Some(tag) => match HANDLERS.iter().find(|(name, _)| *name == tag) {
            Some((_, handler)) => handler(value),
            None => {
                debug!(adapter = "claude_code", tag, "unrecognized stream-json event");
                OutputEvent::unknown(Some(tag), "")
            }
        },
        // Older CLI builds emitted bare message objects without a `type`.
        None if value.get("content").is_some() || value.get("text").is_some() => {
            parse_message(value)
        }
        None => OutputEvent::unknown(None, ""),
    }
}

fn parse_init(value: &Value) -> OutputEvent {
    let session_id = first_str(value, SESSION_ID_KEYS);
    let mut lines = vec![match session_id {
        Some(id) => format!("Session: {id}"),
        None => "Session started".to_string(),
    }];
    if let Some(model) = str_at(value, "model") {
        lines.push(format!("Model: {model}"));
    }
    if let Some(cwd) = str_at(value, "cwd") {
        lines.push(format!("Working directory: {cwd}"));
    }
    if let Some(tools) = value.get("tools").and_then(Value::as_array) {
        lines.push(format!("Tools: {} available", tools.len()));
    }

    OutputEvent::new("init")
        .title("Session started")
        .content(lines.join("\n"))
        .maybe_session_id(session_id.map(str::to_string))
}

fn parse_system(value: &Value) -> OutputEvent {
    let subtype = str_at(value, "subtype");
    if subtype == Some("init") {
        return parse_init(value);
    }

    let subtype = subtype.unwrap_or("system");
    let mut content = format!("System: {subtype}");
    if let Some(message) = str_at(value, "message") {
        content.push('\n');
        content.push_str(message);
    }
    OutputEvent::new("system").item_type(subtype).content(content)
}

/// Legacy `message` shape: role and content at the top level.
fn parse_message(value: &Value) -> OutputEvent {
    let event_type = match str_at(value, "role") {
        Some("assistant") => "assistant",
        Some("user") => "user",
        _ => "message",
    };
    content_event(
        value.get("content").or_else(|| value.get("text")),
        event_type,
    )
}

/// Current `assistant`/`user` shape: role and content nested under `message`. Flat `text` and a
/// plain string `message` are accepted too.
fn parse_role_message(value: &Value) -> OutputEvent {
    let message = value
        .get("message")
        .filter(|message| message.is_object())
        .unwrap_or(value);
    let role = str_at(message, "role").or_else(|| discriminator(value));
    let event_type = if role == Some("assistant") {
        "assistant"
    } else {
        "user"
    };

    let content = message
        .get("content")
        .or_else(|| message.get("text"))
        .or_else(|| value.get("message").filter(|message| message.is_string()));
    let event = content_event(content, event_type);
    match message.get("usage") {
        Some(usage) if usage.is_object() => event.usage(usage_from(usage)),
        _ => event,
    }
}

fn parse_result(value: &Value) -> OutputEvent {
    let subtype = str_at(value, "subtype");
    let failed = bool_at(value, "is_error") == Some(true)
        || subtype.is_some_and(|s| s.starts_with("error"));
    let usage = value
        .get("usage")
        .filter(|usage| usage.is_object())
        .map(usage_from);

    let mut stats = Vec::new();
    if let Some(turns) = u64_at(value, "num_turns") {
        stats.push(format!("turns: {turns}"));
    }
    if let Some(ms) = u64_at(value, "duration_ms") {
        stats.push(format!("duration: {:.1}s", ms as f64 / 1000.0));
    }
    if let Some(cost) = f64_at(value, "total_cost_usd").or_else(|| f64_at(value, "cost_usd")) {
        stats.push(format!("cost: ${cost:.4}"));
    }
    if let Some(usage) = usage {
        stats.push(format!(
            "tokens: {} in / {} out",
            usage.input_tokens, usage.output_tokens
        ));
    }

    let mut lines = Vec::new();
    if let Some(result) = str_at(value, "result") {
        lines.push(result.to_string());
    }
    if !stats.is_empty() {
        lines.push(stats.join(" · "));
    }

    let mut event = OutputEvent::new("result")
        .title(if failed { "Run failed" } else { "Run completed" })
        .content(lines.join("\n"))
        .maybe_session_id(first_str(value, &["session_id", "sessionId"]).map(str::to_string));
    if let Some(usage) = usage {
        event = event.usage(usage);
    }
    if failed {
        let message = first_str(value, &["result", "error"])
            .or(subtype)
            .unwrap_or("run failed");
        event = event.error(message);
    }
    event
}

fn parse_error(value: &Value) -> OutputEvent {
    let (message, code) = match value.get("error") {
        Some(Value::String(message)) => (message.clone(), code_at(value)),
        Some(error @ Value::Object(_)) => (
            first_str(error, &["message", "error"])
                .map(str::to_string)
                .unwrap_or_else(|| display_value(error)),
            code_at(error)
                .or_else(|| code_at(value))
                .or_else(|| str_at(error, "type").map(str::to_string)),
        ),
        _ => (
            str_at(value, "message")
                .unwrap_or("Unknown error")
                .to_string(),
            code_at(value),
        ),
    };

    let content = match &code {
        Some(code) => format!("{message}\nCode: {code}"),
        None => message.clone(),
    };
    OutputEvent::new("error")
        .title("Error")
        .content(content)
        .error(message)
}

fn code_at(value: &Value) -> Option<String> {
    match value.get("code")? {
        Value::String(code) if !code.trim().is_empty() => Some(code.trim().to_string()),
        Value::Number(code) => Some(code.to_string()),
        _ => None,
    }
}
