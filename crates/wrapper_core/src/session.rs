use serde::{Deserialize, Serialize};

/// Configuration for one external assistant CLI.
///
/// Loaded once by the host; adapters only read it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub id: String,
    pub command: String,
    /// Overrides the adapter's default argument template when non-blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument_template: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ToolConfig {
    pub fn new(id: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            command: command.into(),
            argument_template: None,
            enabled: true,
        }
    }

    pub fn argument_template(mut self, template: impl Into<String>) -> Self {
        self.argument_template = Some(template.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// The configured template, ignoring blank overrides.
    pub fn template_override(&self) -> Option<&str> {
        self.argument_template
            .as_deref()
            .filter(|template| !template.trim().is_empty())
    }
}

/// Per-turn resume state. Adapters read it; only the caller updates it between turns.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub is_resume: bool,
    pub thread_id: Option<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resume(thread_id: impl Into<String>) -> Self {
        Self {
            is_resume: true,
            thread_id: Some(thread_id.into()),
        }
    }

    /// The thread id to resume, if resuming and the id is non-blank.
    pub fn resume_id(&self) -> Option<&str> {
        if !self.is_resume {
            return None;
        }
        self.thread_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
