use wrapper_core::{render_template, SessionContext, ToolConfig};

/// Escapes backslash and double quote only. Newlines and other control characters pass through
/// unchanged.
pub fn escape_prompt(prompt: &str) -> String {
    let mut out = String::with_capacity(prompt.len());
    for ch in prompt.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out
}

/// `--session <id>` for a known session, `--continue` when resuming without one.
pub fn resume_fragment(session: &SessionContext) -> String {
    if !session.is_resume {
        return String::new();
    }
    match session.resume_id() {
        Some(id) => format!("--session {id}"),
        None => "--continue".to_string(),
    }
}

/// Assembles `run [--session <id> | --continue] "<prompt>" --format json`.
///
/// A configured argument template replaces the token assembly and is rendered like the other
/// adapters' templates.
pub fn build_arguments(cfg: &ToolConfig, prompt: &str, session: &SessionContext) -> String {
    let escaped = escape_prompt(prompt);
    let fragment = resume_fragment(session);
    if let Some(template) = cfg.template_override() {
        return render_template(template, &escaped, &fragment);
    }

    let quoted = format!("\"{escaped}\"");
    let mut tokens = vec!["run"];
    if !fragment.is_empty() {
        tokens.push(&fragment);
    }
    tokens.extend([quoted.as_str(), "--format", "json"]);
    tokens.join(" ")
}
