use std::collections::HashMap;

use chatfork_types::CanonicalMessage;
use tracing::warn;

use crate::graph::{BranchGraph, ForkPoint};

/// Messages visible under the given per-fork branch selection.
///
/// Forks missing from `selection` follow branch 0. Each fork filters independently:
/// a message strictly after a fork point is hidden when it belongs to one of that
/// fork's branches other than the selected one. Output keeps `index` order.
pub fn resolve_visible<'a>(
    messages: &'a [CanonicalMessage],
    graph: &BranchGraph<'_>,
    selection: &HashMap<String, usize>,
    show_all: bool,
) -> Vec<&'a CanonicalMessage> {
    if show_all || !graph.has_forks() {
        return messages.iter().collect();
    }

    let selected: Vec<(&ForkPoint<'_>, usize)> = graph
        .fork_points()
        .iter()
        .map(|fork| (fork, selected_branch(fork, selection)))
        .collect();

    messages
        .iter()
        .filter(|message| {
            selected
                .iter()
                .all(|(fork, branch)| !hides(fork, *branch, message))
        })
        .collect()
}

fn selected_branch(fork: &ForkPoint<'_>, selection: &HashMap<String, usize>) -> usize {
    let requested = selection.get(fork.point_uuid).copied().unwrap_or(0);
    if requested < fork.branches.len() {
        return requested;
    }
    warn!(
        fork = fork.point_uuid,
        requested,
        branches = fork.branches.len(),
        "branch selection out of range, following branch 0"
    );
    0
}

fn hides(fork: &ForkPoint<'_>, selected: usize, message: &CanonicalMessage) -> bool {
    if message.index <= fork.point_index {
        return false;
    }
    match fork.branch_of(message.index) {
        Some(branch) => branch != selected,
        None => false,
    }
}
