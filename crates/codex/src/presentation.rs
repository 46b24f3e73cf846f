use wrapper_core::{badge, OutputEvent};

use crate::items::{
    AGENT_MESSAGE, COMMAND_EXECUTION, ERROR_ITEM, FILE_CHANGE, MCP_TOOL_CALL, REASONING,
    TODO_LIST, WEB_SEARCH,
};

fn is_item_event(event: &OutputEvent) -> bool {
    event.event_type.starts_with("item.")
}

pub fn event_title(event: &OutputEvent) -> String {
    if let Some(title) = event.title.as_deref().filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    if is_item_event(event) {
        let title = match event.item_type.as_deref() {
            Some(COMMAND_EXECUTION) => "Command",
            Some(AGENT_MESSAGE) => "Agent message",
            Some(REASONING) => "Reasoning",
            Some(TODO_LIST) => "Todo list",
            Some(FILE_CHANGE) => "File changes",
            Some(MCP_TOOL_CALL) => "MCP tool call",
            Some(WEB_SEARCH) => "Web search",
            Some(ERROR_ITEM) => "Error",
            Some(other) => return format!("Unknown item: {other}"),
            None => "Item",
        };
        return title.to_string();
    }
    let title = match event.event_type.as_str() {
        "thread.started" => "Session started",
        "turn.started" => "Turn started",
        "turn.completed" => "Turn completed",
        "turn.failed" => "Turn failed",
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
    if is_item_event(event) {
        return match event.item_type.as_deref() {
            Some(COMMAND_EXECUTION) => badge::COMMAND,
            Some(AGENT_MESSAGE) => badge::ASSISTANT,
            Some(REASONING) => badge::REASONING,
            Some(TODO_LIST) => badge::TODO,
            Some(FILE_CHANGE) => badge::FILE,
            Some(MCP_TOOL_CALL | WEB_SEARCH) => badge::TOOL,
            _ => badge::RAW,
        };
    }
    match event.event_type.as_str() {
        "thread.started" | "turn.started" => badge::SYSTEM,
        "turn.completed" => badge::SUCCESS,
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
    if is_item_event(event) {
        return match event.item_type.as_deref() {
            Some(COMMAND_EXECUTION) => "COMMAND",
            Some(AGENT_MESSAGE) => "ASSISTANT",
            Some(REASONING) => "THINKING",
            Some(TODO_LIST) => "TODO",
            Some(FILE_CHANGE) => "FILES",
            Some(MCP_TOOL_CALL) => "MCP",
            Some(WEB_SEARCH) => "SEARCH",
            _ => "ITEM",
        };
    }
    match event.event_type.as_str() {
        "thread.started" => "SESSION",
        "turn.started" => "TURN",
        "turn.completed" => "DONE",
        _ => "OUTPUT",
    }
}

/// The final text of a completed `agent_message` item.
pub fn extract_assistant_message(event: &OutputEvent) -> Option<&str> {
    let completed_message = event.event_type == "item.completed"
        && event.item_type.as_deref() == Some(AGENT_MESSAGE);
    if completed_message && event.has_content() {
        Some(event.content.as_str())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_failed_renders_as_error() {
        let ev = OutputEvent::new("turn.failed").error("x").unknown_marker();
        assert_eq!(badge_class(&ev), badge::ERROR);
        assert_eq!(badge_label(&ev), "ERROR");
    }

    #[test]
    fn items_are_badged_by_item_type() {
        let ev = OutputEvent::new("item.started").item_type(COMMAND_EXECUTION);
        assert_eq!(badge_class(&ev), badge::COMMAND);
        assert_eq!(event_title(&ev), "Command");

        let ev = OutputEvent::new("item.completed").item_type(FILE_CHANGE);
        assert_eq!(badge_class(&ev), badge::FILE);
        assert_eq!(badge_label(&ev), "FILES");
    }

    #[test]
    fn only_completed_agent_messages_are_extracted() {
        let done = OutputEvent::new("item.completed")
            .item_type(AGENT_MESSAGE)
            .content("All set.");
        assert_eq!(extract_assistant_message(&done), Some("All set."));

        let partial = OutputEvent::new("item.updated")
            .item_type(AGENT_MESSAGE)
            .content("All");
        assert_eq!(extract_assistant_message(&partial), None);

        let reasoning = OutputEvent::new("item.completed")
            .item_type(REASONING)
            .content("thinking");
        assert_eq!(extract_assistant_message(&reasoning), None);
    }
}
