use std::borrow::Cow;
use std::io::Read;

use tracing::debug;

use crate::config::IngestConfig;
use crate::error::{LineRecord, LineRecordError};
use crate::kind::ToolKind;
use crate::reader::{BoundedLine, SyncBoundedLineReader};

/// Turns one bounded line into a record. Blank lines produce nothing.
fn into_record(kind: ToolKind, config: &IngestConfig, line: BoundedLine) -> Option<LineRecord> {
    let (line_number, bytes) = match line {
        BoundedLine::IoError {
            line_number,
            error_kind,
        } => {
            return Some(LineRecord {
                line_number,
                raw_line: None,
                outcome: Err(LineRecordError::Io { kind: error_kind }),
            });
        }
        BoundedLine::LineTooLong {
            line_number,
            observed_bytes,
            max_line_bytes,
        } => {
            debug!(adapter = kind.as_str(), line_number, observed_bytes, "dropping oversized line");
            return Some(LineRecord {
                line_number,
                raw_line: None,
                outcome: Err(LineRecordError::LineTooLong {
                    observed_bytes,
                    max_line_bytes,
                }),
            });
        }
        BoundedLine::Line { line_number, bytes } => (line_number, bytes),
    };

    let decoded = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = decoded {
        debug!(adapter = kind.as_str(), line_number, "replaced invalid UTF-8");
    }
    let line = decoded.strip_suffix('\r').unwrap_or(&decoded);
    if line.trim().is_empty() {
        return None;
    }

    let event = kind.adapter().parse_output_line(line)?;
    Some(LineRecord {
        line_number,
        raw_line: config.capture_raw_line.then(|| line.to_string()),
        outcome: Ok(event),
    })
}

/// Reads tool output line by line and normalizes each line with one adapter.
pub struct LineIngestor<R: Read> {
    reader: SyncBoundedLineReader<R>,
    kind: ToolKind,
    config: IngestConfig,
}

impl<R: Read> LineIngestor<R> {
    pub fn new(reader: R, kind: ToolKind, config: IngestConfig) -> Self {
        Self {
            reader: SyncBoundedLineReader::new(reader, config.limits.max_line_bytes),
            kind,
            config,
        }
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }
}

impl<R: Read> Iterator for LineIngestor<R> {
    type Item = LineRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.reader.next()?;
            if let Some(record) = into_record(self.kind, &self.config, line) {
                return Some(record);
            }
        }
    }
}

#[cfg(feature = "tokio")]
mod tokio_ingest {
    use tokio::io::AsyncRead;

    use super::into_record;
    use crate::config::IngestConfig;
    use crate::error::LineRecord;
    use crate::kind::ToolKind;
    use crate::reader::AsyncBoundedLineReader;

    /// Async counterpart of [`super::LineIngestor`].
    pub struct AsyncLineIngestor<R: AsyncRead + Unpin> {
        reader: AsyncBoundedLineReader<R>,
        kind: ToolKind,
        config: IngestConfig,
    }

    impl<R: AsyncRead + Unpin> AsyncLineIngestor<R> {
        pub fn new(reader: R, kind: ToolKind, config: IngestConfig) -> Self {
            Self {
                reader: AsyncBoundedLineReader::new(reader, config.limits.max_line_bytes),
                kind,
                config,
            }
        }

        pub fn kind(&self) -> ToolKind {
            self.kind
        }

        pub async fn next_record(&mut self) -> Option<LineRecord> {
            loop {
                let line = self.reader.next_line().await?;
                if let Some(record) = into_record(self.kind, &self.config, line) {
                    return Some(record);
                }
            }
        }
    }

}

#[cfg(feature = "tokio")]
pub use tokio_ingest::AsyncLineIngestor;
