use std::io::ErrorKind;

use tokio::io::{AsyncRead, AsyncReadExt};

use super::{BoundedLine, LineAssembler, CHUNK_SIZE_BYTES};

pub(crate) struct AsyncBoundedLineReader<R: AsyncRead + Unpin> {
    reader: R,
    buffer: [u8; CHUNK_SIZE_BYTES],
    buffer_pos: usize,
    buffer_len: usize,
    assembler: LineAssembler,
    done: bool,
}

impl<R: AsyncRead + Unpin> AsyncBoundedLineReader<R> {
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

    pub(crate) async fn next_line(&mut self) -> Option<BoundedLine> {
        if self.done {
            return None;
        }

        loop {
            if self.buffer_pos >= self.buffer_len {
                match self.reader.read(&mut self.buffer).await {
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
