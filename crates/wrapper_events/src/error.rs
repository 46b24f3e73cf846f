use std::io;

use thiserror::Error;
use wrapper_core::OutputEvent;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum LineRecordError {
    #[error("I/O error while reading tool output ({kind})")]
    Io { kind: io::ErrorKind },
    #[error("line too long (observed_bytes={observed_bytes}, max_line_bytes={max_line_bytes})")]
    LineTooLong {
        observed_bytes: usize,
        max_line_bytes: usize,
    },
}

/// One non-blank line of tool output and what it normalized to.
#[derive(Debug, Clone)]
pub struct LineRecord {
    /// 1-based, counting blank lines.
    pub line_number: usize,
    pub raw_line: Option<String>,
    pub outcome: Result<OutputEvent, LineRecordError>,
}
