use anyhow::Result;
use chatfork_engine::build_graph;

use crate::args::{DocumentArgs, SelectionArgs};
use crate::document::{LoadedConversation, build_selection, prune_selection};
use crate::handlers::HandlerContext;
use crate::presentation::presenters;

pub fn handle(ctx: &HandlerContext, args: &DocumentArgs, selection: &SelectionArgs) -> Result<()> {
    let loaded = LoadedConversation::open(args)?;
    let graph = build_graph(loaded.messages());

    let mut selection = build_selection(selection, ctx.config.view.show_all)?;
    prune_selection(&mut selection, &graph);

    let visible = selection.resolve(loaded.messages(), &graph);
    let view_model = presenters::present_thread(&visible, &graph, &selection);
    ctx.render(view_model)
}
