use serde_json::Value;
use wrapper_core::json::{display_value, first_str, i64_at, str_at};
use wrapper_core::{truncate_chars, CommandExecutionInfo, CommandStatus, OutputEvent, TodoItem};

/// Character cap for tool input shown in content.
pub const INPUT_CAP: usize = 500;
/// Character cap for tool output shown in content.
pub const OUTPUT_CAP: usize = 1000;

pub(crate) const BASH_TOOL: &str = "bash";
pub(crate) const TODO_LIST: &str = "todo_list";
const TODO_TOOLS: &[&str] = &["todowrite", "todoread"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Start,
    Finish,
    /// Single event carrying the whole call, as `tool_use` does.
    Combined,
}

impl Phase {
    fn shows_input(self) -> bool {
        matches!(self, Phase::Start | Phase::Combined)
    }

    fn shows_output(self) -> bool {
        matches!(self, Phase::Finish | Phase::Combined)
    }
}

/// Tool fields read from `part` / `part.state`.
struct ToolPart<'a> {
    name: &'a str,
    status: Option<&'a str>,
    input: Option<&'a Value>,
    output: Option<String>,
    error: Option<String>,
    exit_code: Option<i64>,
}

impl<'a> ToolPart<'a> {
    fn read(part: &'a Value) -> Self {
        let state = part.get("state").filter(|state| state.is_object());
        let field = |key: &str| state.and_then(|state| state.get(key)).or_else(|| part.get(key));

        let metadata = state.and_then(|state| state.get("metadata"));
        Self {
            name: first_str(part, &["tool", "name"]).unwrap_or("tool"),
            status: state
                .and_then(|state| str_at(state, "status"))
                .or_else(|| str_at(part, "status")),
            input: field("input").filter(|input| !input.is_null()),
            output: field("output")
                .filter(|output| !output.is_null())
                .map(display_value),
            error: field("error")
                .filter(|error| !error.is_null())
                .map(|error| match error {
                    Value::Object(_) => first_str(error, &["message", "name"])
                        .map(str::to_string)
                        .unwrap_or_else(|| display_value(error)),
                    other => display_value(other),
                }),
            exit_code: metadata.and_then(|meta| i64_at(meta, "exit").or_else(|| i64_at(meta, "exitCode"))),
        }
    }

    fn is_failed(&self) -> bool {
        self.error.is_some() || self.status == Some("error")
    }

    fn command_status(&self, phase: Phase) -> CommandStatus {
        if self.is_failed() {
            return CommandStatus::Failed;
        }
        match (self.status, self.exit_code) {
            (Some("pending" | "running"), _) => CommandStatus::Executing,
            (_, Some(code)) if code != 0 => CommandStatus::Failed,
            (Some("completed"), _) => CommandStatus::Completed,
            _ if phase == Phase::Start => CommandStatus::Executing,
            _ => CommandStatus::Completed,
        }
    }
}

fn input_text(input: &Value) -> String {
    match input {
        Value::String(text) => text.clone(),
        other => display_value(other),
    }
}

pub(crate) fn tool_event(tag: &str, part: &Value, phase: Phase) -> OutputEvent {
    let tool = ToolPart::read(part);
    if TODO_TOOLS.contains(&tool.name) {
        if let Some(event) = todo_event(tag, &tool) {
            return event;
        }
    }

    let mut lines = vec![format!("Tool: {}", tool.name)];
    if phase.shows_input() {
        if let Some(input) = tool.input {
            lines.push(format!("Input: {}", truncate_chars(&input_text(input), INPUT_CAP)));
        }
    }
    let output = tool
        .output
        .as_deref()
        .filter(|output| phase.shows_output() && !output.trim().is_empty())
        .map(|output| truncate_chars(output.trim_end(), OUTPUT_CAP));
    if let Some(output) = &output {
        lines.push(output.clone());
    }
    if let Some(error) = &tool.error {
        lines.push(format!("Error: {error}"));
    }

    let mut event = OutputEvent::new(tag)
        .item_type(tool.name)
        .title(format!("Tool: {}", tool.name))
        .content(lines.join("\n"));

    if tool.name == BASH_TOOL {
        let mut info = CommandExecutionInfo::new(tool.command_status(phase));
        if let Some(command) = tool.input.and_then(|input| str_at(input, "command")) {
            info = info.command(command);
        }
        if let Some(output) = output {
            info = info.output(output);
        }
        if let Some(code) = tool.exit_code {
            info = info.exit_code(code);
        }
        event = event.command_execution(info);
    }

    if tool.is_failed() {
        let message = tool
            .error
            .clone()
            .unwrap_or_else(|| format!("{} failed", tool.name));
        event = event.error(message);
    }
    event
}

fn todo_event(tag: &str, tool: &ToolPart<'_>) -> Option<OutputEvent> {
    let entries = tool.input?.get("todos")?.as_array()?;
    let items: Vec<TodoItem> = entries
        .iter()
        .filter_map(|entry| {
            let title = first_str(entry, &["content", "title", "text"])?;
            let todo = TodoItem::new(title, str_at(entry, "status").unwrap_or("pending"));
            Some(match str_at(entry, "id") {
                Some(id) => todo.id(id),
                None => todo,
            })
        })
        .collect();
    let content = items
        .iter()
        .map(TodoItem::render_line)
        .collect::<Vec<_>>()
        .join("\n");
    Some(
        OutputEvent::new(tag)
            .item_type(TODO_LIST)
            .title("Todo list")
            .content(content)
            .todo_items(items),
    )
}
