use chatfork_types::FormatTag;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummaryViewModel {
    pub title: String,
    pub platform: String,
    pub format: FormatTag,
    pub format_description: String,
    pub source_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    pub message_count: usize,
    pub conversations: Vec<ConversationEntryViewModel>,
    pub selected: ConversationStatsViewModel,
    pub degradations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationEntryViewModel {
    pub ordinal: usize,
    pub uuid: String,
    pub title: String,
    pub message_count: usize,
}

/// Graph statistics of the conversation a command worked on
#[derive(Debug, Clone, Serialize)]
pub struct ConversationStatsViewModel {
    pub ordinal: usize,
    pub message_count: usize,
    pub root_count: usize,
    pub fork_count: usize,
    pub dangling_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResultViewModel {
    pub output_path: String,
    pub exported_count: usize,
}
