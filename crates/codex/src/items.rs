use serde_json::Value;
use tracing::debug;
use wrapper_core::json::{bool_at, collect_text, display_value, first_str, i64_at, str_at, text_at};
use wrapper_core::{CommandExecutionInfo, CommandStatus, OutputEvent, TodoItem};

use crate::jsonl::format_error;

pub(crate) const COMMAND_EXECUTION: &str = "command_execution";
pub(crate) const AGENT_MESSAGE: &str = "agent_message";
pub(crate) const REASONING: &str = "reasoning";
pub(crate) const TODO_LIST: &str = "todo_list";
pub(crate) const FILE_CHANGE: &str = "file_change";
pub(crate) const MCP_TOOL_CALL: &str = "mcp_tool_call";
pub(crate) const WEB_SEARCH: &str = "web_search";
pub(crate) const ERROR_ITEM: &str = "error";

type ItemFormatter = fn(&str, &Value) -> OutputEvent;

const ITEM_FORMATTERS: &[(&str, ItemFormatter)] = &[
    (COMMAND_EXECUTION, command_execution),
    (AGENT_MESSAGE, agent_message),
    (REASONING, reasoning),
    (TODO_LIST, todo_list),
    (FILE_CHANGE, file_change),
    (MCP_TOOL_CALL, mcp_tool_call),
    (WEB_SEARCH, web_search),
    (ERROR_ITEM, item_error),
];

/// Formats `item.started` / `item.updated` / `item.completed` by the nested `item.type`.
pub(crate) fn item_event(event_type: &str, value: &Value) -> OutputEvent {
    let Some(item) = value.get("item").filter(|item| item.is_object()) else {
        return OutputEvent::new(event_type)
            .content(format!("`{event_type}` without an item payload"))
            .unknown_marker();
    };

    let Some(item_type) = first_str(item, &["type", "item_type"]) else {
        return OutputEvent::new(event_type)
            .content("Item without a `type`")
            .unknown_marker();
    };

    match ITEM_FORMATTERS.iter().find(|(name, _)| *name == item_type) {
        Some((_, formatter)) => formatter(event_type, item).item_type(item_type),
        None => {
            debug!(adapter = "codex", item_type, "unrecognized item type");
            OutputEvent::new(event_type)
                .item_type(item_type)
                .content(format!("Unrecognized item type `{item_type}`"))
                .unknown_marker()
        }
    }
}

fn item_text(item: &Value) -> String {
    match text_at(item, "text") {
        Some(text) => text.to_string(),
        None => item.get("content").map(collect_text).unwrap_or_default(),
    }
}

fn command_text(item: &Value) -> Option<String> {
    match item.get("command")? {
        Value::String(command) => Some(command.clone()),
        Value::Array(parts) => Some(
            parts
                .iter()
                .map(display_value)
                .collect::<Vec<_>>()
                .join(" "),
        ),
        _ => None,
    }
}

fn command_status(status: Option<&str>, exit_code: Option<i64>, event_type: &str) -> CommandStatus {
    let by_exit_code = |code: i64| {
        if code == 0 {
            CommandStatus::Completed
        } else {
            CommandStatus::Failed
        }
    };
    match status {
        Some("in_progress") => CommandStatus::Executing,
        Some("failed" | "declined") => CommandStatus::Failed,
        Some("completed") => exit_code.map_or(CommandStatus::Completed, by_exit_code),
        _ => match exit_code {
            Some(code) => by_exit_code(code),
            None if event_type == "item.completed" => CommandStatus::Completed,
            None => CommandStatus::Executing,
        },
    }
}

fn command_execution(event_type: &str, item: &Value) -> OutputEvent {
    let command = command_text(item);
    let output = text_at(item, "aggregated_output")
        .or_else(|| text_at(item, "output"))
        .map(str::trim_end)
        .filter(|output| !output.trim().is_empty());
    let exit_code = i64_at(item, "exit_code");
    let status = command_status(str_at(item, "status"), exit_code, event_type);

    let mut info = CommandExecutionInfo::new(status);
    let mut lines = Vec::new();
    if let Some(command) = &command {
        lines.push(format!("$ {command}"));
        info = info.command(command.clone());
    }
    if let Some(output) = output {
        lines.push(output.to_string());
        info = info.output(output);
    }
    if let Some(code) = exit_code {
        lines.push(format!("Exit code: {code}"));
        info = info.exit_code(code);
    }

    OutputEvent::new(event_type)
        .title("Command")
        .content(lines.join("\n"))
        .command_execution(info)
}

fn agent_message(event_type: &str, item: &Value) -> OutputEvent {
    OutputEvent::new(event_type).content(item_text(item))
}

fn reasoning(event_type: &str, item: &Value) -> OutputEvent {
    OutputEvent::new(event_type)
        .title("Reasoning")
        .content(item_text(item))
}

fn todo_list(event_type: &str, item: &Value) -> OutputEvent {
    let items: Vec<TodoItem> = item
        .get("items")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(todo_entry).collect())
        .unwrap_or_default();
    let content = items
        .iter()
        .map(TodoItem::render_line)
        .collect::<Vec<_>>()
        .join("\n");
    OutputEvent::new(event_type)
        .title("Todo list")
        .content(content)
        .todo_items(items)
}

fn todo_entry(entry: &Value) -> Option<TodoItem> {
    let title = first_str(entry, &["text", "title", "content"])?;
    let status = match str_at(entry, "status") {
        Some(status) => status,
        None if bool_at(entry, "completed") == Some(true) => "completed",
        None => "pending",
    };
    let todo = TodoItem::new(title, status);
    Some(match str_at(entry, "id") {
        Some(id) => todo.id(id),
        None => todo,
    })
}

fn change_prefix(change: &Value) -> &'static str {
    let kind = match change.get("kind") {
        Some(Value::String(kind)) => Some(kind.as_str()),
        Some(kind @ Value::Object(_)) => str_at(kind, "type"),
        _ => None,
    };
    match kind {
        Some("add" | "create" | "added") => "+",
        Some("delete" | "remove" | "deleted") => "-",
        _ => "M",
    }
}

fn file_change(event_type: &str, item: &Value) -> OutputEvent {
    let lines: Vec<String> = item
        .get("changes")
        .and_then(Value::as_array)
        .map(|changes| {
            changes
                .iter()
                .filter_map(|change| {
                    let path = str_at(change, "path")?;
                    Some(format!("{} {path}", change_prefix(change)))
                })
                .collect()
        })
        .unwrap_or_default();

    let event = OutputEvent::new(event_type)
        .title("File changes")
        .content(lines.join("\n"));
    if str_at(item, "status") == Some("failed") {
        event.error("file change failed")
    } else {
        event
    }
}

fn mcp_tool_call(event_type: &str, item: &Value) -> OutputEvent {
    let server = str_at(item, "server").unwrap_or("mcp");
    let tool = str_at(item, "tool").unwrap_or("tool");
    let mut lines = vec![format!("{server}.{tool}")];
    if let Some(status) = str_at(item, "status") {
        lines.push(format!("Status: {status}"));
    }

    let error = item
        .get("error")
        .filter(|error| !error.is_null())
        .map(|error| format_error(Some(error)).0);
    if let Some(message) = &error {
        lines.push(format!("Error: {message}"));
    }

    let event = OutputEvent::new(event_type)
        .title(format!("MCP: {server}.{tool}"))
        .content(lines.join("\n"));
    match error {
        Some(message) => event.error(message),
        None if str_at(item, "status") == Some("failed") => event.error("MCP tool call failed"),
        None => event,
    }
}

fn web_search(event_type: &str, item: &Value) -> OutputEvent {
    let query = str_at(item, "query").unwrap_or_default();
    OutputEvent::new(event_type)
        .title("Web search")
        .content(format!("Search: {query}"))
}

fn item_error(event_type: &str, item: &Value) -> OutputEvent {
    let message = first_str(item, &["message", "text"])
        .unwrap_or("Unknown error")
        .to_string();
    OutputEvent::new(event_type)
        .title("Error")
        .content(message.clone())
        .error(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn command_execution_collects_command_output_and_exit_code() {
        let value = json!({"item": {
            "id": "item_1", "type": "command_execution", "command": "bash -lc ls",
            "aggregated_output": "a.txt\nb.txt\n", "exit_code": 0, "status": "completed"
        }});
        let ev = item_event("item.completed", &value);
        assert_eq!(ev.item_type.as_deref(), Some("command_execution"));
        assert_eq!(ev.content, "$ bash -lc ls\na.txt\nb.txt\nExit code: 0");
        let info = ev.command_execution.unwrap();
        assert_eq!(info.status, CommandStatus::Completed);
        assert_eq!(info.exit_code, Some(0));
    }

    #[test]
    fn command_status_collapses_to_three_states() {
        assert_eq!(
            command_status(Some("in_progress"), None, "item.started"),
            CommandStatus::Executing
        );
        assert_eq!(
            command_status(Some("completed"), Some(2), "item.completed"),
            CommandStatus::Failed
        );
        assert_eq!(
            command_status(Some("declined"), None, "item.completed"),
            CommandStatus::Failed
        );
        assert_eq!(
            command_status(None, None, "item.started"),
            CommandStatus::Executing
        );
    }

    #[test]
    fn array_commands_are_joined() {
        let value = json!({"item": {"type": "command_execution", "command": ["bash", "-lc", "pwd"], "status": "in_progress"}});
        let ev = item_event("item.started", &value);
        assert_eq!(ev.content, "$ bash -lc pwd");
        assert_eq!(
            ev.command_execution.unwrap().status,
            CommandStatus::Executing
        );
    }

    #[test]
    fn todo_list_maps_status_icons() {
        let value = json!({"item": {"type": "todo_list", "items": [
            {"text": "read code", "completed": true},
            {"text": "write fix", "status": "in_progress"},
            {"text": "run tests", "completed": false}
        ]}});
        let ev = item_event("item.updated", &value);
        assert_eq!(ev.content, "✓ read code\n◐ write fix\n○ run tests");
        assert_eq!(ev.todo_items.unwrap().len(), 3);
    }

    #[test]
    fn file_changes_are_prefixed_by_kind() {
        let value = json!({"item": {"type": "file_change", "status": "completed", "changes": [
            {"path": "src/new.rs", "kind": "add"},
            {"path": "src/lib.rs", "kind": "update"},
            {"path": "src/old.rs", "kind": "delete"}
        ]}});
        let ev = item_event("item.completed", &value);
        assert_eq!(ev.content, "+ src/new.rs\nM src/lib.rs\n- src/old.rs");
        assert!(!ev.is_error);
    }

    #[test]
    fn mcp_errors_mark_the_event() {
        let value = json!({"item": {"type": "mcp_tool_call", "server": "docs", "tool": "search",
            "status": "failed", "error": {"message": "timeout"}}});
        let ev = item_event("item.completed", &value);
        assert!(ev.is_error);
        assert_eq!(ev.content, "docs.search\nStatus: failed\nError: timeout");
    }

    #[test]
    fn unknown_item_type_is_flagged() {
        let value = json!({"item": {"type": "image_generation"}});
        let ev = item_event("item.completed", &value);
        assert!(ev.is_unknown);
        assert_eq!(ev.item_type.as_deref(), Some("image_generation"));
    }

    #[test]
    fn missing_item_is_flagged() {
        let ev = item_event("item.started", &json!({"type": "item.started"}));
        assert!(ev.is_unknown);
    }
}
