use serde::Serialize;
use wrapper_core::{OutputEvent, SessionContext, ToolConfig};

use crate::kind::ToolKind;

/// UI hints for one event, as reported by its adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventPresentation {
    pub title: String,
    pub badge_class: &'static str,
    pub badge_label: &'static str,
}

pub fn present(kind: ToolKind, event: &OutputEvent) -> EventPresentation {
    let adapter = kind.adapter();
    EventPresentation {
        title: adapter.event_title(event),
        badge_class: adapter.badge_class(event),
        badge_label: adapter.badge_label(event),
    }
}

/// The assistant reply carried by `event`, if `kind`'s adapter treats it as one.
pub fn extract_assistant_message(kind: ToolKind, event: &OutputEvent) -> Option<&str> {
    kind.adapter().extract_assistant_message(event)
}

/// Drives one conversation with a tool across turns.
///
/// Holds the resume state between turns: [`ToolSession::observe`] records the session id
/// reported by the tool so the next [`ToolSession::build_arguments`] resumes it.
#[derive(Debug, Clone)]
pub struct ToolSession {
    kind: ToolKind,
    config: ToolConfig,
    context: SessionContext,
}

impl ToolSession {
    pub fn new(kind: ToolKind, config: ToolConfig) -> Self {
        Self {
            kind,
            config,
            context: SessionContext::new(),
        }
    }

    pub fn with_context(mut self, context: SessionContext) -> Self {
        self.context = context;
        self
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn build_arguments(&self, prompt: &str) -> String {
        self.kind
            .adapter()
            .build_arguments(&self.config, prompt, &self.context)
    }

    pub fn parse_line(&self, line: &str) -> Option<OutputEvent> {
        self.kind.adapter().parse_output_line(line)
    }

    /// Records the event's session id for the next turn. Returns whether the context changed.
    pub fn observe(&mut self, event: &OutputEvent) -> bool {
        let Some(id) = event
            .session_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
        else {
            return false;
        };
        if self.context.is_resume && self.context.thread_id.as_deref() == Some(id) {
            return false;
        }
        self.context.is_resume = true;
        self.context.thread_id = Some(id.to_string());
        true
    }

    pub fn present(&self, event: &OutputEvent) -> EventPresentation {
        present(self.kind, event)
    }

    pub fn extract_assistant_message<'a>(&self, event: &'a OutputEvent) -> Option<&'a str> {
        extract_assistant_message(self.kind, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_turn_resumes_the_observed_thread() {
        let mut session = ToolSession::new(ToolKind::Codex, ToolConfig::new("codex", "codex"));
        assert!(!session.build_arguments("first").contains("resume"));

        let started = session
            .parse_line(r#"{"type":"thread.started","thread_id":"th_42"}"#)
            .expect("event");
        assert!(session.observe(&started));
        assert!(!session.observe(&started));
        assert_eq!(session.context().resume_id(), Some("th_42"));
        assert!(session.build_arguments("second").contains("resume th_42"));
    }

    #[test]
    fn events_without_session_leave_context_alone() {
        let mut session =
            ToolSession::new(ToolKind::ClaudeCode, ToolConfig::new("claude", "claude"));
        let ev = session.parse_line("plain output").expect("event");
        assert!(!session.observe(&ev));
        assert!(!session.context().is_resume);
    }

    #[test]
    fn presentation_comes_from_the_kind() {
        let ev = OutputEvent::new("turn.failed").error("x").unknown_marker();
        let hints = present(ToolKind::Codex, &ev);
        assert_eq!(hints.badge_label, "ERROR");
        assert_eq!(hints.title, "Turn failed");
    }
}
