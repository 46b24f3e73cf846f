use serde_json::Value;
use wrapper_core::json::{bool_at, collect_text, display_value, first_str, text_at, u64_at};
use wrapper_core::{OutputEvent, TodoItem, UsageInfo};

/// Tools whose structured input is a checklist rather than a generic call.
const TODO_TOOLS: &[&str] = &["TodoWrite", "TodoRead", "TodoUpdate"];

pub(crate) const TOOL_USE: &str = "tool_use";
pub(crate) const TOOL_RESULT: &str = "tool_result";
pub(crate) const TODO_LIST: &str = "todo_list";

/// Outcome of scanning one `content` block array.
enum BlockScan<'a> {
    ToolUse(&'a Value),
    ToolResult(&'a Value),
    Text(String),
}

fn block_type(block: &Value) -> Option<&str> {
    text_at(block, "type")
}

/// A `tool_use` block wins over everything else in the array, then `tool_result`; otherwise the
/// text and thinking blocks are concatenated with thinking set apart by a blank line.
fn scan_blocks(blocks: &[Value]) -> BlockScan<'_> {
    if let Some(block) = blocks.iter().find(|b| block_type(b) == Some(TOOL_USE)) {
        return BlockScan::ToolUse(block);
    }
    if let Some(block) = blocks.iter().find(|b| block_type(b) == Some(TOOL_RESULT)) {
        return BlockScan::ToolResult(block);
    }

    let mut text = String::new();
    let mut last_was_thinking = false;
    for block in blocks {
        match block_type(block) {
            Some("text") => {
                let Some(chunk) = text_at(block, "text") else {
                    continue;
                };
                if last_was_thinking && !text.is_empty() {
                    text.push_str("\n\n");
                }
                text.push_str(chunk);
                last_was_thinking = false;
            }
            Some("thinking") => {
                let Some(chunk) = text_at(block, "thinking").or_else(|| text_at(block, "text"))
                else {
                    continue;
                };
                if !text.is_empty() {
                    text.push_str("\n\n");
                }
                text.push_str(chunk);
                last_was_thinking = true;
            }
            _ => {}
        }
    }
    BlockScan::Text(text)
}

/// Builds the event for a message `content` payload: a flat string or a block array.
pub(crate) fn content_event(content: Option<&Value>, event_type: &str) -> OutputEvent {
    match content {
        Some(Value::Array(blocks)) => match scan_blocks(blocks) {
            BlockScan::ToolUse(block) => tool_use_event(block),
            BlockScan::ToolResult(block) => tool_result_event(block),
            BlockScan::Text(text) => OutputEvent::new(event_type).content(text),
        },
        Some(other) => OutputEvent::new(event_type).content(display_value(other)),
        None => OutputEvent::new(event_type),
    }
}

pub(crate) fn tool_use_event(block: &Value) -> OutputEvent {
    let name = first_str(block, &["name", "tool_name"]).unwrap_or("tool");
    let input = block
        .get("input")
        .or_else(|| block.get("tool_input"))
        .filter(|input| !input.is_null());

    if TODO_TOOLS.contains(&name) {
        if let Some(items) = input.and_then(todo_items) {
            let content = items
                .iter()
                .map(TodoItem::render_line)
                .collect::<Vec<_>>()
                .join("\n");
            return OutputEvent::new(TOOL_USE)
                .item_type(TODO_LIST)
                .title("Todo list")
                .content(content)
                .todo_items(items);
        }
    }

    let mut content = format!("Tool: {name}");
    if let Some(input) = input {
        content.push('\n');
        content.push_str(&display_value(input));
    }
    OutputEvent::new(TOOL_USE)
        .title(format!("Tool: {name}"))
        .content(content)
}

pub(crate) fn tool_result_event(block: &Value) -> OutputEvent {
    let content = block.get("content").map(collect_text).unwrap_or_default();
    let event = OutputEvent::new(TOOL_RESULT)
        .title("Tool result")
        .content(content.clone());
    if bool_at(block, "is_error") == Some(true) {
        event.error(content)
    } else {
        event
    }
}

fn todo_items(input: &Value) -> Option<Vec<TodoItem>> {
    let todos = input.get("todos")?.as_array()?;
    let items = todos
        .iter()
        .filter_map(|todo| {
            let title = first_str(todo, &["content", "title", "text", "activeForm"])?;
            let status = first_str(todo, &["status"]).unwrap_or("pending");
            let item = TodoItem::new(title, status);
            Some(match first_str(todo, &["id"]) {
                Some(id) => item.id(id),
                None => item,
            })
        })
        .collect();
    Some(items)
}

pub(crate) fn usage_from(usage: &Value) -> UsageInfo {
    UsageInfo::new(
        u64_at(usage, "input_tokens").unwrap_or(0),
        u64_at(usage, "output_tokens").unwrap_or(0),
    )
    .cached(u64_at(usage, "cache_read_input_tokens").unwrap_or(0))
}
