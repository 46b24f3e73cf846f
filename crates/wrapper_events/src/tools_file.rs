use std::fs as std_fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wrapper_core::ToolConfig;

/// Serialization formats accepted for a tools file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ToolsFileFormat {
    Json,
    Toml,
}

impl ToolsFileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else {
            None
        }
    }
}

#[derive(Debug, Error)]
pub enum ToolsFileError {
    #[error("failed to read tools file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode tools file from JSON: {source}")]
    JsonDecode {
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode tools file from TOML: {source}")]
    TomlDecode {
        #[source]
        source: toml::de::Error,
    },
    #[error("unsupported tools file format for `{path}` (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf },
}

/// The `[[tools]]` list a host keeps its CLI configuration in.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ToolsFile {
    #[serde(default)]
    pub tools: Vec<ToolConfig>,
}

impl ToolsFile {
    pub fn parse(input: &str, format: ToolsFileFormat) -> Result<Self, ToolsFileError> {
        match format {
            ToolsFileFormat::Json => serde_json::from_str(input)
                .map_err(|source| ToolsFileError::JsonDecode { source }),
            ToolsFileFormat::Toml => {
                toml::from_str(input).map_err(|source| ToolsFileError::TomlDecode { source })
            }
        }
    }

    /// Loads a tools file, inferring the format from the extension when absent.
    pub fn read(
        path: impl AsRef<Path>,
        format: Option<ToolsFileFormat>,
    ) -> Result<Self, ToolsFileError> {
        let path = path.as_ref();
        let format = format
            .or_else(|| ToolsFileFormat::from_path(path))
            .ok_or_else(|| ToolsFileError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;
        let contents = std_fs::read_to_string(path).map_err(|source| ToolsFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, format)
    }
}
