// Engine module - branch structure and views over canonical messages
// This layer sits between normalized documents (providers) and CLI presentation

pub mod annotate;
pub mod export;
pub mod graph;
pub mod selection;
mod timestamp;
pub mod view;

pub use annotate::{AnnotatedMessage, BranchAnnotations, MessageAnnotation};
pub use graph::{Branch, BranchGraph, DanglingKind, DanglingReference, ForkPoint};
pub use selection::{BranchSelection, BranchState};
pub use view::resolve_visible;

use chatfork_types::CanonicalMessage;

// Façade API - Stable public interface for CLI layer

/// Build the branch graph of one conversation's messages
pub fn build_graph(messages: &[CanonicalMessage]) -> BranchGraph<'_> {
    BranchGraph::build(messages)
}
