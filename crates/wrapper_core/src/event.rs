use serde::{Deserialize, Serialize};

/// Event type used for undecodable or non-JSON lines.
pub const RAW_EVENT: &str = "raw";
/// Event type used for plain-text lines that look like errors.
pub const ERROR_EVENT: &str = "error";

/// Token counters reported by a tool. Missing counters are zero, never absent.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct UsageInfo {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cached_input_tokens: u64,
}

impl UsageInfo {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            cached_input_tokens: 0,
        }
    }

    pub fn cached(mut self, cached_input_tokens: u64) -> Self {
        self.cached_input_tokens = cached_input_tokens;
        self
    }

    pub fn total(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Executing,
    Completed,
    Failed,
}

impl CommandStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandStatus::Executing => "executing",
            CommandStatus::Completed => "completed",
            CommandStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CommandExecutionInfo {
    pub command: Option<String>,
    pub output: Option<String>,
    pub exit_code: Option<i64>,
    pub status: CommandStatus,
}

impl CommandExecutionInfo {
    pub fn new(status: CommandStatus) -> Self {
        Self {
            command: None,
            output: None,
            exit_code: None,
            status,
        }
    }

    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn exit_code(mut self, exit_code: i64) -> Self {
        self.exit_code = Some(exit_code);
        self
    }
}

/// One checklist entry maintained by the assistant.
///
/// `status` is usually `pending`, `in_progress` or `completed`; other tool-native values are kept
/// verbatim.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: Option<String>,
    pub title: String,
    pub status: String,
}

impl TodoItem {
    pub fn new(title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            status: status.into(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn status_icon(&self) -> &'static str {
        match self.status.as_str() {
            "completed" => "✓",
            "in_progress" => "◐",
            _ => "○",
        }
    }

    /// Renders `<icon> <title>`, the line shape used in todo-list event content.
    pub fn render_line(&self) -> String {
        format!("{} {}", self.status_icon(), self.title)
    }
}

/// The normalized unit every adapter produces for one line of tool output.
///
/// Built once per parse call through the consuming setters below and handed to the caller as a
/// finished value. When both `is_error` and `is_unknown` are set, consumers treat the event as
/// an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputEvent {
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    pub is_error: bool,
    pub is_unknown: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_execution: Option<CommandExecutionInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo_items: Option<Vec<TodoItem>>,
}

impl OutputEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            ..Self::default()
        }
    }

    /// Passthrough for text that is not (or could not be decoded as) JSON.
    pub fn raw_text(text: impl Into<String>) -> Self {
        Self::new(RAW_EVENT).content(text)
    }

    /// Passthrough for plain-text lines classified as errors.
    pub fn text_error(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(ERROR_EVENT).content(text.clone()).error(text)
    }

    /// Well-formed JSON whose discriminator is not in the adapter's table.
    pub fn unknown(tag: Option<&str>, raw_json: &str) -> Self {
        let content = match tag {
            Some(tag) => format!("Unrecognized event type `{tag}`"),
            None => "Unrecognized event without a `type` field".to_string(),
        };
        Self::new(tag.unwrap_or("unknown"))
            .content(content)
            .unknown_marker()
            .raw_json(raw_json)
    }

    pub fn item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Marks the event as an error and records `message` as its error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.is_error = true;
        self.error_message = Some(message.into());
        self
    }

    pub fn unknown_marker(mut self) -> Self {
        self.is_unknown = true;
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn maybe_session_id(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id;
        self
    }

    pub fn raw_json(mut self, line: impl Into<String>) -> Self {
        self.raw_json = Some(line.into());
        self
    }

    pub fn usage(mut self, usage: UsageInfo) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn command_execution(mut self, info: CommandExecutionInfo) -> Self {
        self.command_execution = Some(info);
        self
    }

    pub fn todo_items(mut self, items: Vec<TodoItem>) -> Self {
        self.todo_items = Some(items);
        self
    }

    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_error_carries_message_and_content() {
        let ev = OutputEvent::text_error("Error: disk full");
        assert_eq!(ev.event_type, "error");
        assert!(ev.is_error);
        assert!(!ev.is_unknown);
        assert_eq!(ev.content, "Error: disk full");
        assert_eq!(ev.error_message.as_deref(), Some("Error: disk full"));
    }

    #[test]
    fn unknown_preserves_tag_and_line() {
        let ev = OutputEvent::unknown(Some("brand.new"), r#"{"type":"brand.new"}"#);
        assert_eq!(ev.event_type, "brand.new");
        assert!(ev.is_unknown);
        assert!(ev.content.contains("brand.new"));
        assert_eq!(ev.raw_json.as_deref(), Some(r#"{"type":"brand.new"}"#));
    }

    #[test]
    fn todo_icons_fall_back_to_pending() {
        assert_eq!(TodoItem::new("a", "completed").status_icon(), "✓");
        assert_eq!(TodoItem::new("b", "in_progress").status_icon(), "◐");
        assert_eq!(TodoItem::new("c", "pending").status_icon(), "○");
        assert_eq!(TodoItem::new("d", "blocked").render_line(), "○ d");
    }

    #[test]
    fn usage_defaults_to_zero_counters() {
        let usage = UsageInfo::default();
        assert_eq!(usage.cached_input_tokens, 0);
        assert_eq!(UsageInfo::new(3, 4).cached(1).total(), 7);
    }
}
