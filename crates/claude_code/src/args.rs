use wrapper_core::{render_template, SessionContext, ToolConfig};

/// Headless `--print` invocation streaming JSON events.
pub const DEFAULT_ARGUMENT_TEMPLATE: &str =
    r#"-p --verbose --output-format=stream-json --dangerously-skip-permissions {session} "{prompt}""#;

/// Escapes a prompt for a double-quoted shell token.
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

/// `--resume <id>` when resuming a known session, otherwise empty.
pub fn resume_fragment(session: &SessionContext) -> String {
    session
        .resume_id()
        .map(|id| format!("--resume {id}"))
        .unwrap_or_default()
}

pub fn build_arguments(cfg: &ToolConfig, prompt: &str, session: &SessionContext) -> String {
    let template = cfg
        .template_override()
        .unwrap_or(DEFAULT_ARGUMENT_TEMPLATE);
    render_template(template, &escape_prompt(prompt), &resume_fragment(session))
}
