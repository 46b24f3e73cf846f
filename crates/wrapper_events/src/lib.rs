#![forbid(unsafe_code)]
//! Dispatch and ingestion on top of the per-tool adapters.
//!
//! - [`ToolKind`] is the closed set of supported tools. A [`wrapper_core::ToolConfig`] is
//!   resolved to one exactly once, and [`ToolRegistry`] keeps the resolved configs loaded from a
//!   tools file.
//! - [`ToolSession`] drives one conversation: it builds each turn's arguments, parses output
//!   lines, and carries the tool's session id into the next turn.
//! - [`LineIngestor`] (and [`AsyncLineIngestor`] with the `tokio` feature) feeds a byte stream
//!   through an adapter with a bounded per-line buffer.

mod config;
mod error;
mod ingest;
mod kind;
mod reader;
mod registry;
mod session;
mod tools_file;

pub use config::{IngestConfig, IngestLimits};
pub use error::{LineRecord, LineRecordError};
pub use ingest::LineIngestor;
pub use kind::{ResolveError, ToolKind, UnknownToolKind};
pub use registry::{RegisteredTool, ToolRegistry};
pub use session::{extract_assistant_message, present, EventPresentation, ToolSession};
pub use tools_file::{ToolsFile, ToolsFileError, ToolsFileFormat};

#[cfg(feature = "tokio")]
pub use ingest::AsyncLineIngestor;
