use anyhow::{Context, Result, bail};
use chatfork_engine::{BranchGraph, BranchSelection};
use chatfork_types::{CanonicalMessage, NormalizedDocument};
use tracing::{debug, warn};

use crate::args::{DocumentArgs, SelectionArgs};

/// A loaded document narrowed to the conversation a command works on
pub struct LoadedConversation {
    pub document: NormalizedDocument,
    pub scope: usize,
}

impl LoadedConversation {
    pub fn open(args: &DocumentArgs) -> Result<Self> {
        let document = chatfork_providers::load_file(&args.file)
            .with_context(|| format!("Failed to load {}", args.file.display()))?;

        if document.conversation_messages(args.conversation).is_none() {
            bail!(
                "Conversation {} out of range ({} available)",
                args.conversation,
                document.conversations.len()
            );
        }

        debug!(
            file = %args.file.display(),
            conversation = args.conversation,
            "conversation selected"
        );

        Ok(Self {
            document,
            scope: args.conversation,
        })
    }

    pub fn messages(&self) -> &[CanonicalMessage] {
        self.document
            .conversation_messages(self.scope)
            .unwrap_or_default()
    }
}

/// Build the branch selection from `--select` pairs; `--all` or the configured default enables show-all
pub fn build_selection(args: &SelectionArgs, default_show_all: bool) -> Result<BranchSelection> {
    let mut selection = BranchSelection::new();
    for raw in &args.select {
        let (fork, branch) = parse_select(raw)?;
        selection.select_branch(fork, branch);
    }

    if args.all || (default_show_all && args.select.is_empty()) {
        selection.toggle_show_all();
    }
    Ok(selection)
}

/// Drop `--select` entries that name no fork in `graph`, warning about each one
pub fn prune_selection(selection: &mut BranchSelection, graph: &BranchGraph<'_>) {
    for fork in selection.prune(graph) {
        warn!(fork = %fork, "--select names no fork point in this conversation, ignoring it");
    }
}

fn parse_select(raw: &str) -> Result<(&str, usize)> {
    let Some((fork, branch)) = raw.rsplit_once('=') else {
        bail!("Invalid --select '{}': expected <fork-uuid>=<branch>", raw);
    };

    let fork = fork.trim();
    if fork.is_empty() {
        bail!("Invalid --select '{}': empty fork uuid", raw);
    }

    let branch = branch
        .trim()
        .parse::<usize>()
        .with_context(|| format!("Invalid --select '{}': branch must be a number", raw))?;
    Ok((fork, branch))
}
