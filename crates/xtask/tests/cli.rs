use std::path::PathBuf;
use std::process::{Command, Output};

const THREAD_ID: &str = "0199a213-81c0-7800-8aa1-bbab2a035a53";

fn xtask(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xtask"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn xtask")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "xtask failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("utf-8 stdout")
}

fn codex_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../codex/tests/fixtures/jsonl/exec.jsonl")
}

#[test]
fn args_prints_the_default_codex_invocation() {
    let out = stdout(&xtask(&["args", "--tool", "codex", "--prompt", "list files"]));
    assert_eq!(
        out.trim_end(),
        r#"exec --skip-git-repo-check --dangerously-bypass-approvals-and-sandbox --json "list files""#
    );
}

#[test]
fn args_resume_and_continue_follow_each_tool() {
    let out = stdout(&xtask(&[
        "args", "--tool", "codex", "--prompt", "next", "--resume", "th_1",
    ]));
    assert!(out.contains("resume th_1 \"next\""), "{out}");

    let out = stdout(&xtask(&[
        "args", "--tool", "opencode", "--prompt", "next", "--continue",
    ]));
    assert!(out.contains("--continue"), "{out}");

    let out = stdout(&xtask(&[
        "args", "--tool", "claude", "--prompt", "next", "--resume", "abc",
    ]));
    assert!(out.contains("--resume abc"), "{out}");
}

#[test]
fn args_template_overrides_default() {
    let out = stdout(&xtask(&[
        "args",
        "--tool",
        "codex",
        "--prompt",
        "hi",
        "--template",
        "exec --json {session} \"{prompt}\"",
    ]));
    assert_eq!(out.trim_end(), "exec --json \"hi\"");
}

#[test]
fn unknown_tool_kind_fails() {
    let output = xtask(&["args", "--tool", "aider", "--prompt", "hi"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("aider"));
}

#[test]
fn replay_text_summarizes_each_line_and_reports_session() {
    let fixture = codex_fixture();
    let out = stdout(&xtask(&[
        "replay",
        "--tool",
        "codex",
        "--input",
        fixture.to_str().expect("utf-8 path"),
    ]));
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines
        .iter()
        .any(|line| line.starts_with("[ASSISTANT]") && line.contains("The directory contains a.txt.")));
    assert!(lines.iter().any(|line| line.contains("sandbox probe skipped")));
    assert!(lines
        .iter()
        .any(|line| line.starts_with("[COMMAND]") && line.ends_with("(completed)")));
    assert!(lines.iter().any(|line| line.ends_with("(2112 tokens)")));
    assert_eq!(lines.last().copied(), Some(format!("session: {THREAD_ID}").as_str()));
}

#[test]
fn replay_json_emits_one_object_per_non_blank_line() {
    let fixture = codex_fixture();
    let out = stdout(&xtask(&[
        "replay",
        "--tool",
        "codex",
        "--format",
        "json",
        "--capture-raw",
        "--input",
        fixture.to_str().expect("utf-8 path"),
    ]));
    let records: Vec<serde_json::Value> = out
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert_eq!(records.len(), 10);

    let first = &records[0];
    assert_eq!(first["line"], 1);
    assert_eq!(first["event"]["session_id"], THREAD_ID);
    assert_eq!(first["presentation"]["badge_label"], "SESSION");
    assert!(first["raw"].as_str().unwrap().contains("thread.started"));

    // Line 6 of the fixture is blank.
    assert_eq!(records[5]["line"], 7);
}

#[test]
fn replay_reports_oversized_lines_and_continues() {
    let fixture = codex_fixture();
    let out = stdout(&xtask(&[
        "replay",
        "--tool",
        "codex",
        "--max-line-bytes",
        "120",
        "--input",
        fixture.to_str().expect("utf-8 path"),
    ]));
    assert!(out.contains("[SKIPPED] line 5: line too long"), "{out}");
    assert!(out.contains("[ASSISTANT]"));
}

#[test]
fn tools_file_ids_select_a_configured_tool() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tools.toml");
    std::fs::write(
        &path,
        r#"
[[tools]]
id = "work"
command = "/opt/bin/opencode"
argument_template = "run {session} \"{prompt}\""
"#,
    )
    .unwrap();

    let out = stdout(&xtask(&[
        "args",
        "--tool",
        "WORK",
        "--tools-file",
        path.to_str().unwrap(),
        "--prompt",
        "hello",
    ]));
    assert_eq!(out.trim_end(), "run \"hello\"");

    let output = xtask(&[
        "args",
        "--tool",
        "missing",
        "--tools-file",
        path.to_str().unwrap(),
        "--prompt",
        "hello",
    ]);
    assert!(!output.status.success());
}
