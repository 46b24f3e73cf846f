use std::io;

mod sync;
#[cfg(feature = "tokio")]
mod tokio_io;

pub(crate) use sync::SyncBoundedLineReader;
#[cfg(feature = "tokio")]
pub(crate) use tokio_io::AsyncBoundedLineReader;

pub(crate) const CHUNK_SIZE_BYTES: usize = 8192;

#[derive(Debug)]
pub(crate) enum BoundedLine {
    Line {
        line_number: usize,
        bytes: Vec<u8>,
    },
    LineTooLong {
        line_number: usize,
        observed_bytes: usize,
        max_line_bytes: usize,
    },
    IoError {
        line_number: usize,
        error_kind: io::ErrorKind,
    },
}

/// Splits a byte stream into lines without ever buffering more than `max_line_bytes` of one.
///
/// Shared by the sync and async readers; it only sees the chunks they read.
#[derive(Debug)]
pub(crate) struct LineAssembler {
    max_line_bytes: usize,
    current_line: Vec<u8>,
    observed_bytes: usize,
    too_long: bool,
    line_number: usize,
}

impl LineAssembler {
    pub(crate) fn new(max_line_bytes: usize) -> Self {
        Self {
            max_line_bytes,
            current_line: Vec::new(),
            observed_bytes: 0,
            too_long: false,
            line_number: 0,
        }
    }

    /// Consumes `chunk` up to and including its first newline. Returns the number of bytes
    /// consumed and the completed line when a newline was found.
    pub(crate) fn feed(&mut self, chunk: &[u8]) -> (usize, Option<BoundedLine>) {
        match chunk.iter().position(|byte| *byte == b'\n') {
            Some(idx) => {
                self.append(&chunk[..idx]);
                (idx + 1, Some(self.finish()))
            }
            None => {
                self.append(chunk);
                (chunk.len(), None)
            }
        }
    }

    /// Flushes a final line that had no trailing newline.
    pub(crate) fn finish_eof(&mut self) -> Option<BoundedLine> {
        (self.observed_bytes > 0).then(|| self.finish())
    }

    pub(crate) fn io_error(&mut self, error_kind: io::ErrorKind) -> BoundedLine {
        self.line_number += 1;
        BoundedLine::IoError {
            line_number: self.line_number,
            error_kind,
        }
    }

    fn append(&mut self, bytes: &[u8]) {
        self.observed_bytes = self.observed_bytes.saturating_add(bytes.len());
        if self.too_long {
            return;
        }
        if self.observed_bytes > self.max_line_bytes {
            self.too_long = true;
            self.current_line = Vec::new();
            return;
        }
        self.current_line.extend_from_slice(bytes);
    }

    fn finish(&mut self) -> BoundedLine {
        self.line_number += 1;
        let line_number = self.line_number;
        let observed_bytes = std::mem::take(&mut self.observed_bytes);
        let bytes = std::mem::take(&mut self.current_line);
        if std::mem::take(&mut self.too_long) {
            BoundedLine::LineTooLong {
                line_number,
                observed_bytes,
                max_line_bytes: self.max_line_bytes,
            }
        } else {
            BoundedLine::Line { line_number, bytes }
        }
    }
}
