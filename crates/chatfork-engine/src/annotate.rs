use std::collections::HashMap;

use chatfork_types::CanonicalMessage;
use serde::Serialize;

use crate::graph::BranchGraph;

/// Branch display data for one message, kept apart from the message itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAnnotation {
    pub is_branch_point: bool,
    /// Position of the innermost branch the message lies on
    pub branch_id: Option<usize>,
    /// Number of branches the message lies on; 0 means none
    pub branch_level: usize,
}

/// Immutable `index -> annotation` map computed from a built graph
#[derive(Debug, Clone, Default)]
pub struct BranchAnnotations {
    by_index: HashMap<usize, MessageAnnotation>,
}

impl BranchAnnotations {
    pub fn compute(graph: &BranchGraph<'_>) -> Self {
        let mut by_index: HashMap<usize, MessageAnnotation> = HashMap::new();

        // fork_points() is ordered by point index, so nested forks are applied last
        for fork in graph.fork_points() {
            by_index.entry(fork.point_index).or_default().is_branch_point = true;
            for (branch_id, branch) in fork.branches.iter().enumerate() {
                for message in &branch.messages {
                    let annotation = by_index.entry(message.index).or_default();
                    annotation.branch_level += 1;
                    annotation.branch_id = Some(branch_id);
                }
            }
        }

        Self { by_index }
    }

    pub fn get(&self, index: usize) -> MessageAnnotation {
        self.by_index.get(&index).copied().unwrap_or_default()
    }

    /// Join messages with their annotations for rendering
    pub fn annotate<'a, I>(&self, messages: I) -> Vec<AnnotatedMessage<'a>>
    where
        I: IntoIterator<Item = &'a CanonicalMessage>,
    {
        messages
            .into_iter()
            .map(|message| AnnotatedMessage {
                message,
                annotation: self.get(message.index),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnnotatedMessage<'a> {
    #[serde(flatten)]
    pub message: &'a CanonicalMessage,
    #[serde(flatten)]
    pub annotation: MessageAnnotation,
}
