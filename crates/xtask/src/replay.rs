use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use wrapper_core::OutputEvent;
use wrapper_events::{
    EventPresentation, IngestConfig, IngestLimits, LineIngestor, LineRecord,
    ToolSession,
};

use crate::tool::ToolSelection;
use crate::Error;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// `[LABEL] title: first content line`
    #[default]
    Text,
    /// One JSON object per record.
    Json,
}

#[derive(Debug, Parser)]
pub struct Args {
    #[command(flatten)]
    pub selection: ToolSelection,

    /// Captured stdout log; reads stdin when omitted or `-`.
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    #[arg(long, default_value_t = IngestLimits::default().max_line_bytes)]
    pub max_line_bytes: usize,

    /// Include each line's raw text in JSON output.
    #[arg(long)]
    pub capture_raw: bool,
}

#[derive(Serialize)]
struct ReplayLine<'a> {
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<&'a OutputEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presentation: Option<EventPresentation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(args: Args) -> Result<(), Error> {
    let mut session = args.selection.session()?;
    let input: Box<dyn Read> = match args.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => Box::new(File::open(path)?),
        _ => Box::new(io::stdin().lock()),
    };
    let config = IngestConfig {
        limits: IngestLimits {
            max_line_bytes: args.max_line_bytes,
        },
        capture_raw_line: args.capture_raw,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for record in LineIngestor::new(input, session.kind(), config) {
        if let Ok(event) = &record.outcome {
            session.observe(event);
        }
        write_record(&mut out, &session, &record, args.format)?;
    }

    if let (OutputFormat::Text, Some(id)) = (args.format, session.context().resume_id()) {
        writeln!(out, "session: {id}")?;
    }
    out.flush()?;
    Ok(())
}

fn write_record(
    out: &mut impl Write,
    session: &ToolSession,
    record: &LineRecord,
    format: OutputFormat,
) -> Result<(), Error> {
    match (format, &record.outcome) {
        (OutputFormat::Json, outcome) => {
            let line = ReplayLine {
                line: record.line_number,
                raw: record.raw_line.as_deref(),
                event: outcome.as_ref().ok(),
                presentation: outcome.as_ref().ok().map(|event| session.present(event)),
                error: outcome.as_ref().err().map(ToString::to_string),
            };
            serde_json::to_writer(&mut *out, &line)?;
            writeln!(out)?;
        }
        (OutputFormat::Text, Ok(event)) => {
            let hints = session.present(event);
            let mut line = format!("[{}] {}", hints.badge_label, hints.title);
            let summary = event.content.lines().next().unwrap_or_default();
            if !summary.is_empty() {
                line.push_str(": ");
                line.push_str(summary);
            }
            if let Some(info) = &event.command_execution {
                line.push_str(&format!(" ({})", info.status.as_str()));
            }
            if let Some(usage) = event.usage {
                line.push_str(&format!(" ({} tokens)", usage.total()));
            }
            writeln!(out, "{line}")?;
        }
        (OutputFormat::Text, Err(err)) => {
            writeln!(out, "[SKIPPED] line {}: {err}", record.line_number)?;
        }
    }
    Ok(())
}
