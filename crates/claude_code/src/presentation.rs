use wrapper_core::{badge, OutputEvent};

use crate::content::{TODO_LIST, TOOL_RESULT, TOOL_USE};

fn is_todo(event: &OutputEvent) -> bool {
    event.item_type.as_deref() == Some(TODO_LIST)
}

pub fn event_title(event: &OutputEvent) -> String {
    if let Some(title) = event.title.as_deref().filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    let title = match event.event_type.as_str() {
        "init" => "Session started",
        "system" => "System",
        "assistant" => "Assistant",
        "user" => "User",
        "message" => "Message",
        TOOL_USE => "Tool call",
        TOOL_RESULT => "Tool result",
        "result" if event.is_error => "Run failed",
        "result" => "Run completed",
        "error" => "Error",
        "raw" => "Output",
        other if event.is_unknown => return format!("Unknown event: {other}"),
        other => other,
    };
    title.to_string()
}

pub fn badge_class(event: &OutputEvent) -> &'static str {
    if event.is_error {
        return badge::ERROR;
    }
    if event.is_unknown {
        return badge::UNKNOWN;
    }
    match event.event_type.as_str() {
        "init" | "system" => badge::SYSTEM,
        "assistant" | "message" => badge::ASSISTANT,
        "user" => badge::USER,
        TOOL_USE if is_todo(event) => badge::TODO,
        TOOL_USE => badge::TOOL,
        TOOL_RESULT => badge::TOOL_RESULT,
        "result" => badge::SUCCESS,
        _ => badge::RAW,
    }
}

pub fn badge_label(event: &OutputEvent) -> &'static str {
    if event.is_error {
        return "ERROR";
    }
    if event.is_unknown {
        return "UNKNOWN";
    }
    match event.event_type.as_str() {
        "init" => "INIT",
        "system" => "SYSTEM",
        "assistant" | "message" => "ASSISTANT",
        "user" => "USER",
        TOOL_USE if is_todo(event) => "TODO",
        TOOL_USE => "TOOL",
        TOOL_RESULT => "RESULT",
        "result" => "DONE",
        _ => "OUTPUT",
    }
}

/// Assistant replies: `assistant` events and role-less legacy `message` events.
pub fn extract_assistant_message(event: &OutputEvent) -> Option<&str> {
    if matches!(event.event_type.as_str(), "assistant" | "message") && event.has_content() {
        Some(event.content.as_str())
    } else {
        None
    }
}
