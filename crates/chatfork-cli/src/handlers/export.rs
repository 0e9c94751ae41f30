use std::collections::HashSet;

use anyhow::{Context, Result};
use chatfork_engine::{build_graph, export};
use chatfork_types::ExportOptions;
use tracing::info;

use crate::args::{DocumentArgs, ExportArgs, SelectionArgs};
use crate::document::{LoadedConversation, build_selection, prune_selection};
use crate::handlers::HandlerContext;
use crate::presentation::presenters;

pub fn handle(
    ctx: &HandlerContext,
    args: &DocumentArgs,
    selection: &SelectionArgs,
    export_args: &ExportArgs,
) -> Result<()> {
    let loaded = LoadedConversation::open(args)?;
    let graph = build_graph(loaded.messages());

    let mut selection = build_selection(selection, ctx.config.view.show_all)?;
    prune_selection(&mut selection, &graph);
    let visible = selection.resolve(loaded.messages(), &graph);

    let options = export_options(ctx, export_args);
    let marked: HashSet<usize> = export_args.marked.iter().flatten().copied().collect();
    let messages = export::select(visible, &options, &marked);
    let json = serde_json::to_string_pretty(&messages)?;

    match &export_args.output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), count = messages.len(), "export written");
            ctx.render(presenters::present_export_result(path, messages.len()))
        }
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

/// Config values first, then `--no-*` flags switch fields off
fn export_options(ctx: &HandlerContext, args: &ExportArgs) -> ExportOptions {
    let mut options = ctx.config.export.to_options();
    options.include_thinking &= !args.no_thinking;
    options.include_artifacts &= !args.no_artifacts;
    options.include_tools &= !args.no_tools;
    options.include_citations &= !args.no_citations;
    options.include_timestamps &= !args.no_timestamps;
    options.export_marked_only = args.marked.is_some();
    options
}
