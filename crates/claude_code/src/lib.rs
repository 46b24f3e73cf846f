#![forbid(unsafe_code)]
//! Adapter for the Claude Code CLI (`claude`) in headless `-p` mode.
//!
//! Builds the `--output-format=stream-json` invocation and normalizes each emitted line into
//! [`wrapper_core::OutputEvent`]. Message events carry typed content blocks; a `tool_use` block
//! takes precedence over any text in the same message, and `TodoWrite`-style calls surface as
//! todo lists instead of raw tool input.

mod args;
mod content;
mod presentation;
mod stream_json;

pub use args::{build_arguments, escape_prompt, resume_fragment, DEFAULT_ARGUMENT_TEMPLATE};
pub use presentation::{badge_class, badge_label, event_title, extract_assistant_message};
pub use stream_json::parse_stream_json_line;

use wrapper_core::{OutputEvent, SessionContext, ToolAdapter, ToolConfig};

#[derive(Debug, Clone, Copy, Default)]
pub struct ClaudeCodeAdapter;

impl ClaudeCodeAdapter {
    pub const fn new() -> Self {
        Self
    }
}

impl ToolAdapter for ClaudeCodeAdapter {
    fn name(&self) -> &'static str {
        "claude_code"
    }

    fn known_ids(&self) -> &'static [&'static str] {
        &["claude", "claude-code", "claude_code", "claudecode"]
    }

    fn tool_name(&self) -> &'static str {
        "claude"
    }

    fn competing_names(&self) -> &'static [&'static str] {
        &["codex", "opencode"]
    }

    fn build_arguments(&self, cfg: &ToolConfig, prompt: &str, session: &SessionContext) -> String {
        build_arguments(cfg, prompt, session)
    }

    fn parse_output_line(&self, line: &str) -> Option<OutputEvent> {
        parse_stream_json_line(line)
    }

    fn event_title(&self, event: &OutputEvent) -> String {
        event_title(event)
    }

    fn badge_class(&self, event: &OutputEvent) -> &'static str {
        badge_class(event)
    }

    fn badge_label(&self, event: &OutputEvent) -> &'static str {
        badge_label(event)
    }

    fn extract_assistant_message<'a>(&self, event: &'a OutputEvent) -> Option<&'a str> {
        extract_assistant_message(event)
    }
}
