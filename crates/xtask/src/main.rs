mod build_args;
mod replay;
mod tool;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wrapper_events::{ToolsFileError, UnknownToolKind};

#[derive(Debug, Parser)]
#[command(name = "xtask")]
#[command(about = "Developer tasks for the CLI adapters")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the argument string a tool would be launched with.
    Args(build_args::Args),
    /// Normalize a captured stdout log and print one event per line.
    Replay(replay::Args),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    ToolsFile(#[from] ToolsFileError),
    #[error(transparent)]
    UnknownKind(#[from] UnknownToolKind),
    #[error("no enabled tool `{0}` in the tools file")]
    UnknownTool(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<(), Error> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Args(args) => build_args::run(args),
        Command::Replay(args) => replay::run(args),
    }
}
