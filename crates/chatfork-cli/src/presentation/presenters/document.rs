use std::path::Path;

use chatfork_engine::BranchGraph;
use chatfork_providers::get_format_metadata;
use chatfork_types::NormalizedDocument;

use crate::presentation::view_models::{
    CommandResultViewModel, ConversationEntryViewModel, ConversationStatsViewModel,
    DocumentSummaryViewModel, ExportResultViewModel,
};

pub fn present_document_summary(
    document: &NormalizedDocument,
    scope: usize,
    graph: &BranchGraph<'_>,
) -> CommandResultViewModel<DocumentSummaryViewModel> {
    let metadata = &document.metadata;

    let conversations = document
        .conversations
        .iter()
        .enumerate()
        .map(|(ordinal, conversation)| ConversationEntryViewModel {
            ordinal,
            uuid: conversation.uuid.clone(),
            title: conversation.title.clone(),
            message_count: conversation.len(),
        })
        .collect();

    let selected = ConversationStatsViewModel {
        ordinal: scope,
        message_count: graph.messages().len(),
        root_count: graph.roots().len(),
        fork_count: graph.fork_points().len(),
        dangling_count: graph.dangling().len(),
    };

    let content = DocumentSummaryViewModel {
        title: metadata.title.clone(),
        platform: metadata.platform.clone(),
        format: metadata.format,
        format_description: get_format_metadata(metadata.format).description.to_string(),
        source_file: metadata.source_file.clone(),
        model: metadata.model.clone(),
        project: metadata.project.clone(),
        created_at: metadata.created_at.clone(),
        exported_at: metadata.exported_at.clone(),
        message_count: metadata.message_count,
        conversations,
        selected,
        degradations: document.degradations.iter().map(|d| d.to_string()).collect(),
    };

    let mut result = CommandResultViewModel::new(content);

    if !document.degradations.is_empty() {
        result = result.with_warning(format!(
            "{} field(s) could not be read as expected",
            document.degradations.len()
        ));
    }

    if graph.has_forks() {
        result = result.suggest(
            "List the branches at each fork",
            format!("chatfork forks {}", metadata.source_file),
        );
    }

    if document.is_multi_conversation() {
        result = result.suggest(
            "Pick another conversation",
            format!("chatfork inspect {} --conversation <N>", metadata.source_file),
        );
    }

    result
}

pub fn present_export_result(
    output_path: &Path,
    exported_count: usize,
) -> CommandResultViewModel<ExportResultViewModel> {
    let content = ExportResultViewModel {
        output_path: output_path.display().to_string(),
        exported_count,
    };

    CommandResultViewModel::new(content).with_info(format!("Exported {} messages", exported_count))
}
