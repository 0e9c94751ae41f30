use std::collections::HashMap;

use chatfork_types::CanonicalMessage;
use tracing::debug;

use crate::graph::BranchGraph;
use crate::view::resolve_visible;

/// State of one fork in the branch switcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchState {
    Following(usize),
}

/// Per-document branch switcher state.
///
/// Starts with every fork following branch 0 and the filtered view active. Entering
/// show-all clears every selection, so leaving it again returns to the default view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchSelection {
    selections: HashMap<String, usize>,
    show_all: bool,
}

impl BranchSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow `branch` at `fork_uuid`; always leaves show-all mode
    pub fn select_branch(&mut self, fork_uuid: &str, branch: usize) {
        self.selections.insert(fork_uuid.to_string(), branch);
        self.show_all = false;
    }

    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
        if self.show_all {
            self.selections.clear();
        }
    }

    pub fn state(&self, fork_uuid: &str) -> BranchState {
        BranchState::Following(self.selections.get(fork_uuid).copied().unwrap_or(0))
    }

    pub fn is_showing_all(&self) -> bool {
        self.show_all
    }

    pub fn selection_map(&self) -> &HashMap<String, usize> {
        &self.selections
    }

    /// Drop selections for forks that no longer exist in `graph`; returns the dropped fork uuids, sorted
    pub fn prune(&mut self, graph: &BranchGraph<'_>) -> Vec<String> {
        let mut dropped: Vec<String> = self
            .selections
            .keys()
            .filter(|uuid| !graph.is_fork_point(uuid))
            .cloned()
            .collect();
        dropped.sort();

        for uuid in &dropped {
            self.selections.remove(uuid);
        }
        if !dropped.is_empty() {
            debug!(dropped = dropped.len(), "pruned selections for vanished forks");
        }
        dropped
    }

    pub fn resolve<'a>(
        &self,
        messages: &'a [CanonicalMessage],
        graph: &BranchGraph<'_>,
    ) -> Vec<&'a CanonicalMessage> {
        resolve_visible(messages, graph, &self.selections, self.show_all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatfork_testing::MessageTree;
    use chatfork_testing::messages::seconds;

    #[test]
    fn test_initial_state() {
        let selection = BranchSelection::new();
        assert_eq!(selection.state("any"), BranchState::Following(0));
        assert!(!selection.is_showing_all());
        assert!(selection.selection_map().is_empty());
    }

    #[test]
    fn test_select_leaves_show_all() {
        let mut selection = BranchSelection::new();
        selection.toggle_show_all();
        assert!(selection.is_showing_all());

        selection.select_branch("f", 2);
        assert!(!selection.is_showing_all());
        assert_eq!(selection.state("f"), BranchState::Following(2));
    }

    #[test]
    fn test_show_all_round_trip_resets_selections() {
        let mut selection = BranchSelection::new();
        selection.select_branch("f", 1);
        selection.toggle_show_all();
        selection.toggle_show_all();

        assert!(!selection.is_showing_all());
        assert_eq!(selection.state("f"), BranchState::Following(0));
    }

    #[test]
    fn test_prune_drops_vanished_forks() {
        let messages = MessageTree::new()
            .root("a", &seconds(0))
            .reply("b", "a", &seconds(1))
            .reply("c", "a", &seconds(2))
            .build();
        let graph = BranchGraph::build(&messages);

        let mut selection = BranchSelection::new();
        selection.select_branch("a", 1);
        selection.select_branch("gone", 1);
        assert_eq!(selection.prune(&graph), vec!["gone".to_string()]);
        assert!(selection.prune(&graph).is_empty());

        assert_eq!(selection.selection_map().len(), 1);
        let visible: Vec<&str> = selection
            .resolve(&messages, &graph)
            .into_iter()
            .map(|m| m.uuid.as_str())
            .collect();
        assert_eq!(visible, vec!["a", "c"]);
    }
}
