//! CSS-style badge classes shared by every adapter's presentation hints.

pub const ERROR: &str = "badge-error";
pub const UNKNOWN: &str = "badge-unknown";
pub const SYSTEM: &str = "badge-system";
pub const ASSISTANT: &str = "badge-assistant";
pub const USER: &str = "badge-user";
pub const REASONING: &str = "badge-reasoning";
pub const TOOL: &str = "badge-tool";
pub const TOOL_RESULT: &str = "badge-tool-result";
pub const COMMAND: &str = "badge-command";
pub const TODO: &str = "badge-todo";
pub const FILE: &str = "badge-file";
pub const SUCCESS: &str = "badge-success";
pub const RAW: &str = "badge-raw";
