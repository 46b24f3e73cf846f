#![forbid(unsafe_code)]
//! Normalized event model and adapter contract shared by the CLI wrapper crates.
//!
//! Each wrapper crate (`claude_code`, `codex`, `opencode`) implements [`ToolAdapter`] on top of
//! the helpers here: line classification, lenient JSON accessors and argument templates.
//! Nothing in this crate performs I/O.

mod adapter;
pub mod badge;
mod event;
pub mod json;
mod line;
mod session;
mod template;

pub use adapter::ToolAdapter;
pub use event::{
    CommandExecutionInfo, CommandStatus, OutputEvent, TodoItem, UsageInfo, ERROR_EVENT, RAW_EVENT,
};
pub use line::{classify_line, discriminator, text_event, ErrorMarkers, LineShape};
pub use session::{SessionContext, ToolConfig};
pub use template::{
    collapse_spaces, render_template, truncate_chars, ELLIPSIS, PROMPT_PLACEHOLDER,
    SESSION_PLACEHOLDER,
};
