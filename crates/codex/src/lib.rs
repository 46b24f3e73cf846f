#![forbid(unsafe_code)]
//! Adapter for the OpenAI Codex CLI in `codex exec --json` mode.
//!
//! Resuming is a positional `resume <id>` subcommand (or `resume --last` when no thread id is
//! known) rather than a flag. The JSONL stream is split into lifecycle events
//! (`thread.started`, `turn.*`, `error`) and item events whose nested `item.type` decides the
//! formatting:
//!
//! - `command_execution` renders `$ command`, output, and exit code, and carries a three-state
//!   [`wrapper_core::CommandStatus`].
//! - `todo_list` renders one `✓`/`◐`/`○` line per entry.
//! - `file_change` renders `+`/`M`/`-` per path.
//!
//! `turn.failed` is reported as both an error and an unrecognized event.

mod args;
mod items;
mod jsonl;
mod presentation;

pub use args::{
    build_arguments, escape_prompt, resume_fragment, ResumeSelector, DEFAULT_ARGUMENT_TEMPLATE,
};
pub use jsonl::parse_jsonl_line;
pub use presentation::{badge_class, badge_label, event_title, extract_assistant_message};

use wrapper_core::{OutputEvent, SessionContext, ToolAdapter, ToolConfig};

#[derive(Debug, Clone, Copy, Default)]
pub struct CodexAdapter;

impl CodexAdapter {
    pub const fn new() -> Self {
        Self
    }
}

impl ToolAdapter for CodexAdapter {
    fn name(&self) -> &'static str {
        "codex"
    }

    fn known_ids(&self) -> &'static [&'static str] {
        &["codex", "codex-cli", "codex_cli"]
    }

    fn tool_name(&self) -> &'static str {
        "codex"
    }

    fn competing_names(&self) -> &'static [&'static str] {
        &["claude", "opencode"]
    }

    fn build_arguments(&self, cfg: &ToolConfig, prompt: &str, session: &SessionContext) -> String {
        build_arguments(cfg, prompt, session)
    }

    fn parse_output_line(&self, line: &str) -> Option<OutputEvent> {
        parse_jsonl_line(line)
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
