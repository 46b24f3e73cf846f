use serde_json::Value;
use tracing::debug;
use wrapper_core::json::{collect_text, f64_at, first_str, str_at, text_at, u64_at};
use wrapper_core::{
    classify_line, discriminator, text_event, ErrorMarkers, LineShape, OutputEvent, UsageInfo,
};

use crate::tools::{tool_event, Phase};

const SESSION_ID_KEYS: &[&str] = &["sessionID", "sessionId", "session_id"];

/// `opencode` log lines start with an upper-case level.
const MARKERS: ErrorMarkers = ErrorMarkers {
    prefixes: &["ERROR ", "error:"],
    substrings: &["ProviderInitError", "AI_APICallError"],
};

type Handler = fn(&str, &Value) -> OutputEvent;

const HANDLERS: &[(&str, Handler)] = &[
    ("step_start", step_start),
    ("step_finish", step_finish),
    ("tool_start", tool_start),
    ("tool_finish", tool_finish),
    ("tool_use", tool_use),
    ("tool_result", tool_finish),
    ("message", text_part),
    ("text", text_part),
    ("reasoning", reasoning),
    ("session_start", session_start),
    ("session_end", session_end),
    ("complete", session_end),
];

/// Normalizes one line of `opencode run --format json` output.
pub fn parse_json_line(line: &str) -> Option<OutputEvent> {
    match classify_line(line) {
        LineShape::Blank => None,
        LineShape::Text(text) | LineShape::Malformed(text) => Some(text_event(text, &MARKERS)),
        LineShape::Json { line, value } => Some(parse_document(&value).raw_json(line)),
    }
}

fn parse_document(value: &Value) -> OutputEvent {
    let event = match discriminator(value) {
        // `error` carries its payload at the top level rather than under `part`.
        Some("error") => error_event(value),
        Some(tag) => match HANDLERS.iter().find(|(name, _)| *name == tag) {
            Some((_, handler)) => handler(tag, part_of(value)),
            None => {
                debug!(adapter = "opencode", tag, "unrecognized json event");
                OutputEvent::unknown(Some(tag), "")
            }
        },
        None => OutputEvent::unknown(None, ""),
    };
    event.maybe_session_id(session_id(value).map(str::to_string))
}

/// The `part` payload, or the event itself for flat shapes.
fn part_of(value: &Value) -> &Value {
    value
        .get("part")
        .filter(|part| part.is_object())
        .unwrap_or(value)
}

fn session_id(value: &Value) -> Option<&str> {
    first_str(value, SESSION_ID_KEYS).or_else(|| {
        value
            .get("part")
            .and_then(|part| first_str(part, SESSION_ID_KEYS))
    })
}

fn step_start(tag: &str, _part: &Value) -> OutputEvent {
    OutputEvent::new(tag).title("Step started")
}

fn step_finish(tag: &str, part: &Value) -> OutputEvent {
    let mut stats = Vec::new();
    if let Some(reason) = str_at(part, "reason") {
        stats.push(format!("reason: {reason}"));
    }
    if let Some(cost) = f64_at(part, "cost") {
        stats.push(format!("cost: ${cost:.4}"));
    }

    let usage = part.get("tokens").filter(|t| t.is_object()).map(|tokens| {
        let cached = tokens
            .get("cache")
            .and_then(|cache| u64_at(cache, "read"))
            .unwrap_or(0);
        UsageInfo::new(
            u64_at(tokens, "input").unwrap_or(0),
            u64_at(tokens, "output").unwrap_or(0),
        )
        .cached(cached)
    });
    if let Some(usage) = usage {
        stats.push(format!(
            "tokens: {} in / {} out",
            usage.input_tokens, usage.output_tokens
        ));
    }

    let event = OutputEvent::new(tag)
        .title("Step finished")
        .content(stats.join(" · "));
    match usage {
        Some(usage) => event.usage(usage),
        None => event,
    }
}

fn tool_start(tag: &str, part: &Value) -> OutputEvent {
    tool_event(tag, part, Phase::Start)
}

fn tool_finish(tag: &str, part: &Value) -> OutputEvent {
    tool_event(tag, part, Phase::Finish)
}

fn tool_use(tag: &str, part: &Value) -> OutputEvent {
    tool_event(tag, part, Phase::Combined)
}

fn part_text(part: &Value) -> String {
    match text_at(part, "text") {
        Some(text) => text.to_string(),
        None => part.get("content").map(collect_text).unwrap_or_default(),
    }
}

fn text_part(tag: &str, part: &Value) -> OutputEvent {
    OutputEvent::new(tag).content(part_text(part))
}

fn reasoning(tag: &str, part: &Value) -> OutputEvent {
    OutputEvent::new(tag)
        .title("Reasoning")
        .content(part_text(part))
}

fn session_start(tag: &str, part: &Value) -> OutputEvent {
    let content = match first_str(part, &["sessionID", "sessionId", "session_id", "id"]) {
        Some(id) => format!("Session: {id}"),
        None => String::new(),
    };
    OutputEvent::new(tag)
        .title("Session started")
        .content(content)
}

fn session_end(tag: &str, part: &Value) -> OutputEvent {
    let event = OutputEvent::new(tag).title("Session completed");
    match str_at(part, "reason") {
        Some(reason) => event.content(format!("reason: {reason}")),
        None => event,
    }
}

/// `{"type":"error","error":{"name":...,"data":{"message":...}}}`, or a bare string / message.
fn error_event(value: &Value) -> OutputEvent {
    let error = value
        .get("error")
        .or_else(|| value.get("part").and_then(|part| part.get("error")));

    let (name, message) = match error {
        Some(Value::String(message)) => (None, Some(message.trim().to_string())),
        Some(error @ Value::Object(_)) => (
            str_at(error, "name"),
            error
                .get("data")
                .and_then(|data| str_at(data, "message"))
                .or_else(|| str_at(error, "message"))
                .map(str::to_string),
        ),
        _ => (None, str_at(value, "message").map(str::to_string)),
    };
    let message = message
        .filter(|m| !m.is_empty())
        .or_else(|| name.map(str::to_string))
        .unwrap_or_else(|| "Unknown error".to_string());

    let content = match name {
        Some(name) if name != message => format!("{message}\nCode: {name}"),
        _ => message.clone(),
    };
    OutputEvent::new("error")
        .title("Error")
        .content(content)
        .error(message)
}
