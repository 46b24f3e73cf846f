use wrapper_events::{present, ToolKind};

fn pseudo_random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 56) as u8
        })
        .collect()
}

fn corpus() -> Vec<String> {
    let mut lines = vec![
        String::new(),
        " \t ".to_string(),
        "\u{0}\u{1}\u{7}\u{7f}".to_string(),
        "{".to_string(),
        "[".to_string(),
        "{\"type\":\"assistant\",\"message\":{".to_string(),
        "{}".to_string(),
        "[]".to_string(),
        "[1,2,3]".to_string(),
        "{\"type\":null}".to_string(),
        "{\"type\":42}".to_string(),
        "{\"type\":\"\"}".to_string(),
        "{\"type\":\"item.completed\",\"item\":5}".to_string(),
        "{\"type\":\"item.completed\",\"item\":{\"type\":\"todo_list\",\"items\":\"nope\"}}".to_string(),
        "{\"type\":\"item.completed\",\"item\":{\"type\":\"file_change\",\"changes\":[1,{\"kind\":3}]}}".to_string(),
        "{\"type\":\"assistant\",\"message\":\"flat\"}".to_string(),
        "{\"type\":\"assistant\",\"message\":{\"content\":[null,1,{\"type\":\"tool_use\"}]}}".to_string(),
        "{\"type\":\"tool_use\",\"part\":[]}".to_string(),
        "{\"type\":\"tool_finish\",\"part\":{\"state\":{\"error\":{}}}}".to_string(),
        "{\"type\":\"step_finish\",\"part\":{\"tokens\":{\"input\":-5,\"cache\":7}}}".to_string(),
        "{\"type\":\"result\",\"usage\":{\"input_tokens\":\"many\"},\"duration_ms\":-1}".to_string(),
        "{\"type\":\"turn.failed\",\"error\":[1]}".to_string(),
        "{\"type\":\"error\",\"error\":{\"data\":null}}".to_string(),
        "{\"type\":\"turn.completed\",\"usage\":{\"input_tokens\":18446744073709551615}}".to_string(),
        "session id:".to_string(),
        "SESSION ID: ✓".to_string(),
        format!(
            "{{\"type\":\"tool_start\",\"part\":{{\"tool\":\"write\",\"state\":{{\"input\":\"{}\"}}}}}}",
            "é".repeat(600)
        ),
        format!("{}{}", "[".repeat(200), "]".repeat(200)),
        format!("{}{}", "{\"a\":".repeat(200), "}".repeat(200)),
    ];
    for seed in 1..=16 {
        let bytes = pseudo_random_bytes(seed, 64 + seed as usize * 7);
        lines.push(String::from_utf8_lossy(&bytes).into_owned());
    }
    lines
}

#[test]
fn no_adapter_panics_on_hostile_lines() {
    for kind in ToolKind::ALL {
        let adapter = kind.adapter();
        for line in corpus() {
            let event = adapter.parse_output_line(&line);
            if line.trim().is_empty() {
                assert!(event.is_none(), "{kind}: blank line produced an event");
                continue;
            }
            let event = event.unwrap_or_else(|| panic!("{kind}: no event for {line:?}"));
            let hints = present(kind, &event);
            assert!(!hints.title.is_empty());
            let _ = adapter.extract_assistant_message(&event);
        }
    }
}

#[test]
fn deep_nesting_degrades_to_raw_text() {
    let line = format!("{}{}", "[".repeat(200), "]".repeat(200));
    for kind in ToolKind::ALL {
        let event = kind.adapter().parse_output_line(&line).expect("event");
        assert_eq!(event.event_type, "raw", "{kind}");
        assert!(event.raw_json.is_none());
    }
}

#[test]
fn multibyte_input_is_truncated_on_char_boundaries() {
    let line = format!(
        "{{\"type\":\"tool_start\",\"part\":{{\"tool\":\"write\",\"state\":{{\"input\":\"{}\"}}}}}}",
        "é".repeat(600)
    );
    let event = ToolKind::OpenCode
        .adapter()
        .parse_output_line(&line)
        .expect("event");
    let input = event
        .content
        .lines()
        .find_map(|line| line.strip_prefix("Input: "))
        .expect("input line");
    assert_eq!(input.chars().count(), 503);
}
