/// Per-line bounds applied while reading tool output.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct IngestLimits {
    /// Lines longer than this (excluding the newline) are reported and skipped, never buffered.
    pub max_line_bytes: usize,
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self {
            max_line_bytes: 64 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct IngestConfig {
    pub limits: IngestLimits,
    /// Keep the decoded source line on each record.
    pub capture_raw_line: bool,
}
