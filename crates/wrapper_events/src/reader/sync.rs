use std::io::{ErrorKind, Read};

use super::{BoundedLine, LineAssembler, CHUNK_SIZE_BYTES};

pub(crate) struct SyncBoundedLineReader<R: Read> {
    reader: R,
    buffer: [u8; CHUNK_SIZE_BYTES],
    buffer_pos: usize,
    buffer_len: usize,
    assembler: LineAssembler,
    done: bool,
}

impl<R: Read> SyncBoundedLineReader<R> {
    pub(crate) fn new(reader: R, max_line_bytes: usize) -> Self {
        Self {
            reader,
            buffer: [0u8; CHUNK_SIZE_BYTES],
            buffer_pos: 0,
            buffer_len: 0,
            assembler: LineAssembler::new(max_line_bytes),
            done: false,
        }
    }
}

impl<R: Read> Iterator for SyncBoundedLineReader<R> {
    type Item = BoundedLine;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if self.buffer_pos >= self.buffer_len {
                match self.reader.read(&mut self.buffer) {
                    Ok(0) => {
                        self.done = true;
                        return self.assembler.finish_eof();
                    }
                    Ok(n) => {
                        self.buffer_pos = 0;
                        self.buffer_len = n;
                    }
                    Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                    Err(err) => {
                        self.done = true;
                        return Some(self.assembler.io_error(err.kind()));
                    }
                }
            }

            let (consumed, line) = self
                .assembler
                .feed(&self.buffer[self.buffer_pos..self.buffer_len]);
            self.buffer_pos += consumed;
            if line.is_some() {
                return line;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_line_is_discarded_and_iteration_continues() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"ok\n");
        bytes.extend_from_slice(&[b'a'; 50]);
        bytes.extend_from_slice(b"\nnext");

        let reader = SyncBoundedLineReader::new(std::io::Cursor::new(bytes), 16);
        let lines: Vec<_> = reader.collect();

        assert_eq!(lines.len(), 3);
        assert!(matches!(lines[0], BoundedLine::Line { .. }));
        assert!(matches!(lines[1], BoundedLine::LineTooLong { observed_bytes: 50, .. }));
        assert!(matches!(lines[2], BoundedLine::Line { line_number: 3, .. }));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn io_error_ends_iteration() {
        let lines: Vec<_> = SyncBoundedLineReader::new(FailingReader, 16).collect();
        assert_eq!(lines.len(), 1);
        assert!(matches!(
            lines[0],
            BoundedLine::IoError {
                error_kind: ErrorKind::BrokenPipe,
                ..
            }
        ));
    }
}
