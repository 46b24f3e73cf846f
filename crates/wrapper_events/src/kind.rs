use std::fmt;
use std::str::FromStr;

use claude_code::ClaudeCodeAdapter;
use codex::CodexAdapter;
use opencode::OpenCodeAdapter;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use wrapper_core::{ToolAdapter, ToolConfig};

static CLAUDE_CODE: ClaudeCodeAdapter = ClaudeCodeAdapter::new();
static CODEX: CodexAdapter = CodexAdapter::new();
static OPENCODE: OpenCodeAdapter = OpenCodeAdapter::new();

/// The closed set of supported CLI tools.
///
/// A [`ToolConfig`] is resolved to a kind once, when it is loaded; every later call goes straight
/// to the kind's adapter without re-running the `can_handle` checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    #[serde(rename = "claude_code")]
    ClaudeCode,
    #[serde(rename = "codex")]
    Codex,
    #[serde(rename = "opencode")]
    OpenCode,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no adapter handles tool `{id}` (command `{command}`)")]
    NoAdapter { id: String, command: String },
    #[error("tool `{id}` matches more than one adapter: {candidates:?}")]
    Ambiguous {
        id: String,
        candidates: Vec<ToolKind>,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown tool kind `{0}`")]
pub struct UnknownToolKind(pub String);

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::ClaudeCode, ToolKind::Codex, ToolKind::OpenCode];

    pub fn adapter(self) -> &'static dyn ToolAdapter {
        match self {
            ToolKind::ClaudeCode => &CLAUDE_CODE,
            ToolKind::Codex => &CODEX,
            ToolKind::OpenCode => &OPENCODE,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.adapter().name()
    }

    /// Matches an identifier against each adapter's known ids, ignoring ASCII case.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL.into_iter().find(|kind| {
            kind.adapter()
                .known_ids()
                .iter()
                .any(|known| known.eq_ignore_ascii_case(id))
        })
    }

    /// Picks the adapter for `cfg`. An id match wins outright; otherwise the command must name
    /// exactly one tool.
    pub fn resolve(cfg: &ToolConfig) -> Result<Self, ResolveError> {
        if let Some(kind) = Self::from_id(&cfg.id) {
            return Ok(kind);
        }

        let command = cfg.command.to_ascii_lowercase();
        let candidates: Vec<ToolKind> = Self::ALL
            .into_iter()
            .filter(|kind| command.contains(kind.adapter().tool_name()))
            .collect();
        match candidates.as_slice() {
            [kind] => Ok(*kind),
            [] => Err(ResolveError::NoAdapter {
                id: cfg.id.clone(),
                command: cfg.command.clone(),
            }),
            _ => {
                warn!(tool = %cfg.id, ?candidates, "tool config matches several adapters");
                Err(ResolveError::Ambiguous {
                    id: cfg.id.clone(),
                    candidates,
                })
            }
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = UnknownToolKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| UnknownToolKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_resolve_case_insensitively() {
        assert_eq!(ToolKind::from_id("Claude"), Some(ToolKind::ClaudeCode));
        assert_eq!(ToolKind::from_id(" codex "), Some(ToolKind::Codex));
        assert_eq!(ToolKind::from_id("OPENCODE"), Some(ToolKind::OpenCode));
        assert_eq!(ToolKind::from_id("gemini"), None);
    }

    #[test]
    fn command_match_is_used_when_id_is_custom() {
        let cfg = ToolConfig::new("work-assistant", "/opt/bin/codex");
        assert_eq!(ToolKind::resolve(&cfg), Ok(ToolKind::Codex));
    }

    #[test]
    fn id_match_beats_command_match() {
        let cfg = ToolConfig::new("opencode", "/usr/bin/claude");
        assert_eq!(ToolKind::resolve(&cfg), Ok(ToolKind::OpenCode));
    }

    #[test]
    fn unmatched_config_reports_no_adapter() {
        let cfg = ToolConfig::new("mine", "/usr/bin/aider");
        assert!(matches!(
            ToolKind::resolve(&cfg),
            Err(ResolveError::NoAdapter { .. })
        ));
    }

    #[test]
    fn command_naming_two_tools_is_ambiguous() {
        let cfg = ToolConfig::new("custom", "claude-codex-bridge");
        assert_eq!(
            ToolKind::resolve(&cfg),
            Err(ResolveError::Ambiguous {
                id: "custom".to_string(),
                candidates: vec![ToolKind::ClaudeCode, ToolKind::Codex],
            })
        );

        let cfg = ToolConfig::new("custom", "claude codex opencode");
        assert!(matches!(
            ToolKind::resolve(&cfg),
            Err(ResolveError::Ambiguous { candidates, .. }) if candidates.len() == 3
        ));
    }

    #[test]
    fn adapter_names_round_trip_through_from_str() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.as_str().parse::<ToolKind>(), Ok(kind));
        }
        assert!("aider".parse::<ToolKind>().is_err());
    }

    #[test]
    fn serde_names_match_adapter_names() {
        for kind in ToolKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
