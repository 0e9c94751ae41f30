use crate::types::{ColorMode, LogLevel, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chatfork")]
#[command(about = "Inspect branching AI chat exports", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Config file (default: $CHATFORK_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured color mode for plain output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the detected format, metadata and counts
    Inspect {
        #[command(flatten)]
        document: DocumentArgs,
    },

    /// List fork points and their branches
    Forks {
        #[command(flatten)]
        document: DocumentArgs,
    },

    /// Print the messages visible under a branch selection
    View {
        #[command(flatten)]
        document: DocumentArgs,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Write the visible messages as a JSON array
    Export {
        #[command(flatten)]
        document: DocumentArgs,

        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        export: ExportArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DocumentArgs {
    /// Exported chat JSON file
    pub file: PathBuf,

    /// Conversation to use in a multi-conversation export
    #[arg(long, default_value = "0")]
    pub conversation: usize,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Follow a branch at a fork: `<fork-uuid>=<branch>` (repeatable)
    #[arg(long = "select", value_name = "FORK=BRANCH")]
    pub select: Vec<String>,

    /// Show every message regardless of branch selection
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    #[arg(long)]
    pub no_thinking: bool,

    #[arg(long)]
    pub no_artifacts: bool,

    #[arg(long)]
    pub no_tools: bool,

    #[arg(long)]
    pub no_citations: bool,

    #[arg(long)]
    pub no_timestamps: bool,

    /// Export only these message indices (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub marked: Option<Vec<usize>>,

    /// Write to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}
