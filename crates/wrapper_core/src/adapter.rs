use crate::{OutputEvent, SessionContext, ToolConfig};

/// Capability contract shared by every CLI adapter.
///
/// Implementations are stateless: every method takes `&self`, reads no mutable state and may be
/// called concurrently from any number of sessions.
pub trait ToolAdapter: Send + Sync {
    /// Short, stable adapter name used in logs and registry listings.
    fn name(&self) -> &'static str;

    /// Identifiers matched case-insensitively against [`ToolConfig::id`].
    fn known_ids(&self) -> &'static [&'static str];

    /// Substring looked up in [`ToolConfig::command`].
    fn tool_name(&self) -> &'static str;

    /// Tool names of other adapters. A command mentioning one of them is ambiguous and is not
    /// claimed by command match alone.
    fn competing_names(&self) -> &'static [&'static str];

    fn can_handle(&self, cfg: &ToolConfig) -> bool {
        let id = cfg.id.trim();
        if self
            .known_ids()
            .iter()
            .any(|known| known.eq_ignore_ascii_case(id))
        {
            return true;
        }

        let command = cfg.command.to_ascii_lowercase();
        command.contains(self.tool_name())
            && !self
                .competing_names()
                .iter()
                .any(|other| command.contains(other))
    }

    /// Builds the full argument string the process is launched with.
    fn build_arguments(&self, cfg: &ToolConfig, prompt: &str, session: &SessionContext) -> String;

    /// Normalizes one raw output line. Returns `None` only for blank input.
    fn parse_output_line(&self, line: &str) -> Option<OutputEvent>;

    fn supports_stream_parsing(&self) -> bool {
        true
    }

    fn event_title(&self, event: &OutputEvent) -> String;

    fn badge_class(&self, event: &OutputEvent) -> &'static str;

    fn badge_label(&self, event: &OutputEvent) -> &'static str;

    /// Returns the event content when the event carries an assistant reply.
    fn extract_assistant_message<'a>(&self, event: &'a OutputEvent) -> Option<&'a str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake;

    impl ToolAdapter for Fake {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn known_ids(&self) -> &'static [&'static str] {
            &["fake", "fake-cli"]
        }

        fn tool_name(&self) -> &'static str {
            "fake"
        }

        fn competing_names(&self) -> &'static [&'static str] {
            &["other"]
        }

        fn build_arguments(&self, _: &ToolConfig, prompt: &str, _: &SessionContext) -> String {
            prompt.to_string()
        }

        fn parse_output_line(&self, line: &str) -> Option<OutputEvent> {
            Some(OutputEvent::raw_text(line))
        }

        fn event_title(&self, _: &OutputEvent) -> String {
            String::new()
        }

        fn badge_class(&self, _: &OutputEvent) -> &'static str {
            ""
        }

        fn badge_label(&self, _: &OutputEvent) -> &'static str {
            ""
        }

        fn extract_assistant_message<'a>(&self, _: &'a OutputEvent) -> Option<&'a str> {
            None
        }
    }

    #[test]
    fn can_handle_matches_id_case_insensitively() {
        assert!(Fake.can_handle(&ToolConfig::new("FAKE-CLI", "/usr/bin/whatever")));
    }

    #[test]
    fn can_handle_rejects_ambiguous_commands() {
        assert!(Fake.can_handle(&ToolConfig::new("x", "/opt/Fake/bin/fake")));
        assert!(!Fake.can_handle(&ToolConfig::new("x", "fake-other-bridge")));
        assert!(Fake.can_handle(&ToolConfig::new("fake", "fake-other-bridge")));
    }
}
