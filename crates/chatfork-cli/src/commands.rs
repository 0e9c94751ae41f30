use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::config::Config;
use crate::handlers::{self, HandlerContext};

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let ctx = HandlerContext::new(cli.format, config, cli.color);

    match &cli.command {
        Commands::Inspect { document } => handlers::inspect::handle(&ctx, document),

        Commands::Forks { document } => handlers::forks::handle(&ctx, document),

        Commands::View {
            document,
            selection,
        } => handlers::view::handle(&ctx, document, selection),

        Commands::Export {
            document,
            selection,
            export,
        } => handlers::export::handle(&ctx, document, selection, export),
    }
}
