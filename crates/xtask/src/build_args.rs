use clap::Parser;
use wrapper_core::SessionContext;
use wrapper_events::ToolSession;

use crate::tool::ToolSelection;
use crate::Error;

#[derive(Debug, Parser)]
pub struct Args {
    #[command(flatten)]
    pub selection: ToolSelection,

    #[arg(long)]
    pub prompt: String,

    /// Resume this session or thread id.
    #[arg(long, conflicts_with = "continue_last")]
    pub resume: Option<String>,

    /// Resume without a known id (`resume --last` / `--continue` where supported).
    #[arg(long = "continue")]
    pub continue_last: bool,

    /// Argument template to use instead of the tool's default (`{prompt}`, `{session}`).
    #[arg(long)]
    pub template: Option<String>,
}

pub fn run(args: Args) -> Result<(), Error> {
    let context = match (&args.resume, args.continue_last) {
        (Some(id), _) => SessionContext::resume(id.clone()),
        (None, true) => SessionContext {
            is_resume: true,
            thread_id: None,
        },
        (None, false) => SessionContext::new(),
    };
    let mut session = args.selection.session()?;
    if let Some(template) = args.template {
        let config = session.config().clone().argument_template(template);
        session = ToolSession::new(session.kind(), config);
    }
    let session = session.with_context(context);
    println!("{}", session.build_arguments(&args.prompt));
    Ok(())
}
