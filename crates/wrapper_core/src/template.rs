pub const PROMPT_PLACEHOLDER: &str = "{prompt}";
pub const SESSION_PLACEHOLDER: &str = "{session}";
pub const ELLIPSIS: &str = "...";

/// Substitutes `{session}` and `{prompt}` into an argument template.
///
/// `prompt` must already be escaped for the tool's quoting convention. Space runs left in the
/// template text (typically by an empty session fragment) collapse to one space and the result
/// is trimmed; the prompt itself is inserted verbatim.
pub fn render_template(template: &str, prompt: &str, session: &str) -> String {
    if prompt.is_empty() {
        let rendered = template
            .replace(SESSION_PLACEHOLDER, session)
            .replace(PROMPT_PLACEHOLDER, "");
        return collapse_spaces(&rendered).trim().to_string();
    }

    template
        .split(PROMPT_PLACEHOLDER)
        .map(|segment| collapse_spaces(&segment.replace(SESSION_PLACEHOLDER, session)))
        .collect::<Vec<_>>()
        .join(prompt)
        .trim()
        .to_string()
}

pub fn collapse_spaces(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_space = false;
    for ch in input.chars() {
        if ch == ' ' {
            if previous_space {
                continue;
            }
            previous_space = true;
        } else {
            previous_space = false;
        }
        out.push(ch);
    }
    out
}

/// Caps `input` at `max_chars` characters, appending [`ELLIPSIS`] when anything was cut.
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    match input.char_indices().nth(max_chars) {
        None => input.to_string(),
        Some((cut, _)) => format!("{}{ELLIPSIS}", &input[..cut]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_session_leaves_no_double_spaces() {
        let out = render_template("-p {session} \"{prompt}\"", "hi", "");
        assert_eq!(out, "-p \"hi\"");
    }

    #[test]
    fn prompt_spacing_is_preserved() {
        let out = render_template("run {session}  \"{prompt}\"", "a  b", "--resume x");
        assert_eq!(out, "run --resume x \"a  b\"");
    }

    #[test]
    fn empty_prompt_still_collapses() {
        assert_eq!(render_template("{session} {prompt} --x", "", ""), "--x");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("héllo", 5), "héllo");
        assert_eq!(truncate_chars("héllo", 2), "hé...");
        assert_eq!(truncate_chars(&"x".repeat(600), 500).chars().count(), 503);
    }
}
