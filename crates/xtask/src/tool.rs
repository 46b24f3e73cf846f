use std::path::PathBuf;

use clap::Args;
use wrapper_core::ToolConfig;
use wrapper_events::{ToolKind, ToolRegistry, ToolSession};

use crate::Error;

/// Which tool to drive: a built-in kind, or an id from a tools file.
#[derive(Debug, Args)]
pub struct ToolSelection {
    /// Tool kind (`claude_code`, `codex`, `opencode`, or any alias), or a tool id when
    /// `--tools-file` is given.
    #[arg(long)]
    pub tool: String,

    /// TOML or JSON file with a `tools` list.
    #[arg(long)]
    pub tools_file: Option<PathBuf>,
}

impl ToolSelection {
    pub fn session(&self) -> Result<ToolSession, Error> {
        match &self.tools_file {
            Some(path) => {
                let registry = ToolRegistry::from_file(path, None)?;
                for unresolved in registry.unresolved() {
                    tracing::warn!(%unresolved, "tool config not usable");
                }
                registry
                    .session(&self.tool)
                    .ok_or_else(|| Error::UnknownTool(self.tool.clone()))
            }
            None => {
                let kind: ToolKind = self.tool.parse()?;
                Ok(ToolSession::new(
                    kind,
                    ToolConfig::new(kind.as_str(), kind.as_str()),
                ))
            }
        }
    }
}
