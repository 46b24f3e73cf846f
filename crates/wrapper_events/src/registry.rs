use std::path::Path;

use tracing::debug;
use wrapper_core::ToolConfig;

use crate::kind::{ResolveError, ToolKind};
use crate::session::ToolSession;
use crate::tools_file::{ToolsFile, ToolsFileError, ToolsFileFormat};

/// An enabled config together with the adapter it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredTool {
    pub kind: ToolKind,
    pub config: ToolConfig,
}

/// Enabled tool configs, each resolved to a [`ToolKind`] once at load time.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    unresolved: Vec<ResolveError>,
}

impl ToolRegistry {
    pub fn from_configs(configs: impl IntoIterator<Item = ToolConfig>) -> Self {
        let mut registry = Self::default();
        for config in configs {
            if !config.enabled {
                debug!(tool = %config.id, "skipping disabled tool");
                continue;
            }
            match ToolKind::resolve(&config) {
                Ok(kind) => {
                    debug!(tool = %config.id, kind = %kind, "resolved tool");
                    registry.tools.push(RegisteredTool { kind, config });
                }
                Err(err) => {
                    debug!(tool = %config.id, error = %err, "tool left unresolved");
                    registry.unresolved.push(err);
                }
            }
        }
        registry
    }

    pub fn from_file(
        path: impl AsRef<Path>,
        format: Option<ToolsFileFormat>,
    ) -> Result<Self, ToolsFileError> {
        Ok(Self::from_configs(ToolsFile::read(path, format)?.tools))
    }

    /// Looks a tool up by its configured id, ignoring ASCII case. The first match wins.
    pub fn get(&self, id: &str) -> Option<&RegisteredTool> {
        let id = id.trim();
        self.tools
            .iter()
            .find(|tool| tool.config.id.trim().eq_ignore_ascii_case(id))
    }

    /// Starts a fresh conversation with the tool registered under `id`.
    pub fn session(&self, id: &str) -> Option<ToolSession> {
        self.get(id)
            .map(|tool| ToolSession::new(tool.kind, tool.config.clone()))
    }

    pub fn tools(&self) -> &[RegisteredTool] {
        &self.tools
    }

    /// Enabled configs that no adapter claimed, or that several adapters claimed.
    pub fn unresolved(&self) -> &[ResolveError] {
        &self.unresolved
    }
}
