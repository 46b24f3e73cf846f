//! Lenient accessors over decoded tool output.
//!
//! Tool schemas drift between releases, so every accessor tolerates missing keys and wrong
//! value types by returning `None`.

use serde_json::Value;

/// A string field, untrimmed.
pub fn text_at<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// A string field, trimmed, ignoring blank values.
pub fn str_at<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    text_at(value, key)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// The first non-blank string among `keys`, in priority order.
pub fn first_str<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| str_at(value, key))
}

pub fn u64_at(value: &Value, key: &str) -> Option<u64> {
    value.get(key).and_then(as_u64_lenient)
}

pub fn i64_at(value: &Value, key: &str) -> Option<i64> {
    let field = value.get(key)?;
    field
        .as_i64()
        .or_else(|| field.as_f64().map(|f| f as i64))
        .or_else(|| field.as_str().and_then(|s| s.trim().parse().ok()))
}

pub fn f64_at(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

pub fn bool_at(value: &Value, key: &str) -> Option<bool> {
    value.get(key).and_then(Value::as_bool)
}

fn as_u64_lenient(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
}

/// Renders a payload for display: strings verbatim, everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Collects text from a payload that is a string, a `{text}` object, or an array of either.
pub fn collect_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(collect_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(_) => text_at(value, "text")
            .map(str::to_string)
            .unwrap_or_else(|| display_value(value)),
        other => display_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_str_follows_priority_and_skips_blanks() {
        let v = json!({"session_id": " ", "sessionId": "b", "id": "c"});
        assert_eq!(first_str(&v, &["session_id", "sessionId", "id"]), Some("b"));
        assert_eq!(first_str(&v, &["missing"]), None);
    }

    #[test]
    fn numeric_accessors_are_lenient() {
        let v = json!({"a": 5, "b": 7.0, "c": "-2", "d": "x", "e": -1});
        assert_eq!(u64_at(&v, "a"), Some(5));
        assert_eq!(u64_at(&v, "b"), Some(7));
        assert_eq!(u64_at(&v, "e"), None);
        assert_eq!(i64_at(&v, "c"), Some(-2));
        assert_eq!(i64_at(&v, "d"), None);
    }

    #[test]
    fn collect_text_flattens_block_arrays() {
        let v = json!([{"type": "text", "text": "a"}, "b", {"type": "image"}]);
        assert_eq!(collect_text(&v), "a\nb\n{\"type\":\"image\"}");
    }
}
