use wrapper_core::{badge, OutputEvent};

use crate::tools::{BASH_TOOL, TODO_LIST};

fn is_tool_event(event: &OutputEvent) -> bool {
    event.event_type.starts_with("tool_")
}

pub fn event_title(event: &OutputEvent) -> String {
    if let Some(title) = event.title.as_deref().filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    let title = match event.event_type.as_str() {
        "step_start" => "Step started",
        "step_finish" => "Step finished",
        "message" | "text" => "Assistant",
        "reasoning" => "Reasoning",
        "session_start" => "Session started",
        "session_end" | "complete" => "Session completed",
        "error" => "Error",
        "raw" => "Output",
        _ if is_tool_event(event) => "Tool",
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
    if is_tool_event(event) {
        return match event.item_type.as_deref() {
            Some(BASH_TOOL) => badge::COMMAND,
            Some(TODO_LIST) => badge::TODO,
            _ if matches!(event.event_type.as_str(), "tool_finish" | "tool_result") => {
                badge::TOOL_RESULT
            }
            _ => badge::TOOL,
        };
    }
    match event.event_type.as_str() {
        "message" | "text" => badge::ASSISTANT,
        "reasoning" => badge::REASONING,
        "step_start" | "step_finish" | "session_start" => badge::SYSTEM,
        "session_end" | "complete" => badge::SUCCESS,
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
    if is_tool_event(event) {
        return match event.item_type.as_deref() {
            Some(BASH_TOOL) => "COMMAND",
            Some(TODO_LIST) => "TODO",
            _ => "TOOL",
        };
    }
    match event.event_type.as_str() {
        "message" | "text" => "ASSISTANT",
        "reasoning" => "THINKING",
        "step_start" | "step_finish" => "STEP",
        "session_start" => "SESSION",
        "session_end" | "complete" => "DONE",
        _ => "OUTPUT",
    }
}

pub fn extract_assistant_message(event: &OutputEvent) -> Option<&str> {
    if matches!(event.event_type.as_str(), "message" | "text") && event.has_content() {
        Some(event.content.as_str())
    } else {
        None
    }
}
