#![forbid(unsafe_code)]
//! Adapter for the OpenCode CLI in `opencode run --format json` mode.
//!
//! Every JSON line has a top-level `type` and `sessionID`; the payload sits in a nested `part`
//! whose shape depends on the type. Tool input and output are capped at [`INPUT_CAP`] and
//! [`OUTPUT_CAP`] characters before they reach event content.

mod args;
mod events;
mod presentation;
mod tools;

pub use args::{build_arguments, escape_prompt, resume_fragment};
pub use events::parse_json_line;
pub use presentation::{badge_class, badge_label, event_title, extract_assistant_message};
pub use tools::{INPUT_CAP, OUTPUT_CAP};

use wrapper_core::{OutputEvent, SessionContext, ToolAdapter, ToolConfig};

#[derive(Debug, Clone, Copy, Default)]
pub struct OpenCodeAdapter;

impl OpenCodeAdapter {
    pub const fn new() -> Self {
        Self
    }
}

impl ToolAdapter for OpenCodeAdapter {
    fn name(&self) -> &'static str {
        "opencode"
    }

    fn known_ids(&self) -> &'static [&'static str] {
        &["opencode", "open-code", "open_code"]
    }

    fn tool_name(&self) -> &'static str {
        "opencode"
    }

    fn competing_names(&self) -> &'static [&'static str] {
        &["claude", "codex"]
    }

    fn build_arguments(&self, cfg: &ToolConfig, prompt: &str, session: &SessionContext) -> String {
        build_arguments(cfg, prompt, session)
    }

    fn parse_output_line(&self, line: &str) -> Option<OutputEvent> {
        parse_json_line(line)
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
