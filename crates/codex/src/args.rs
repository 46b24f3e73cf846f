use wrapper_core::{render_template, SessionContext, ToolConfig};

/// Non-interactive `codex exec` emitting JSONL events.
pub const DEFAULT_ARGUMENT_TEMPLATE: &str =
    r#"exec --skip-git-repo-check --dangerously-bypass-approvals-and-sandbox --json {session} "{prompt}""#;

/// Which prior thread `codex exec resume` should continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeSelector {
    Id(String),
    Last,
}

impl ResumeSelector {
    pub fn from_session(session: &SessionContext) -> Option<Self> {
        if !session.is_resume {
            return None;
        }
        Some(match session.resume_id() {
            Some(id) => ResumeSelector::Id(id.to_string()),
            None => ResumeSelector::Last,
        })
    }

    /// The positional `resume` subcommand fragment.
    pub fn fragment(&self) -> String {
        match self {
            ResumeSelector::Id(id) => format!("resume {id}"),
            ResumeSelector::Last => "resume --last".to_string(),
        }
    }
}

/// Escapes a prompt embedded in a double-quoted token.
///
/// Matches the Claude Code escaping today, but Codex owns its own quoting and the two may
/// diverge.
pub fn escape_prompt(prompt: &str) -> String {
    let mut out = String::with_capacity(prompt.len());
    for ch in prompt.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

pub fn resume_fragment(session: &SessionContext) -> String {
    ResumeSelector::from_session(session)
        .map(|selector| selector.fragment())
        .unwrap_or_default()
}

pub fn build_arguments(cfg: &ToolConfig, prompt: &str, session: &SessionContext) -> String {
    let template = cfg
        .template_override()
        .unwrap_or(DEFAULT_ARGUMENT_TEMPLATE);
    render_template(template, &escape_prompt(prompt), &resume_fragment(session))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ToolConfig {
        ToolConfig::new("codex", "codex")
    }

    #[test]
    fn fresh_turn_uses_default_template() {
        assert_eq!(
            build_arguments(&cfg(), "list files", &SessionContext::new()),
            r#"exec --skip-git-repo-check --dangerously-bypass-approvals-and-sandbox --json "list files""#
        );
    }

    #[test]
    fn resume_is_a_bare_positional() {
        let args = build_arguments(&cfg(), "next", &SessionContext::resume("th_1"));
        assert_eq!(
            args,
            r#"exec --skip-git-repo-check --dangerously-bypass-approvals-and-sandbox --json resume th_1 "next""#
        );
        assert!(!args.contains("--resume"));
    }

    #[test]
    fn resume_without_id_selects_last() {
        let session = SessionContext {
            is_resume: true,
            thread_id: Some("  ".to_string()),
        };
        assert_eq!(
            ResumeSelector::from_session(&session),
            Some(ResumeSelector::Last)
        );
        assert_eq!(resume_fragment(&session), "resume --last");
    }

    #[test]
    fn escaping_covers_json_control_characters() {
        assert_eq!(escape_prompt("a\"b\\c\td\r\ne"), r#"a\"b\\c\td\r\ne"#);
    }
}
