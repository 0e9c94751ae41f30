use anyhow::Result;
use chatfork_engine::build_graph;

use crate::args::DocumentArgs;
use crate::document::LoadedConversation;
use crate::handlers::HandlerContext;
use crate::presentation::presenters;

pub fn handle(ctx: &HandlerContext, args: &DocumentArgs) -> Result<()> {
    let loaded = LoadedConversation::open(args)?;
    let graph = build_graph(loaded.messages());

    ctx.render(presenters::present_forks(&graph))
}
