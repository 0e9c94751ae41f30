use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use crate::message::CanonicalMessage;

/// Source schema a document was classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatTag {
    /// Array of `{human, assistant}` turn pairs (optionally wrapped in `{conversation: [...]}`)
    TurnPairs,
    /// One conversation object with a per-message array
    RichConversation,
    /// Array of rich conversation objects (full account export)
    RichExport,
}

impl FormatTag {
    pub fn name(&self) -> &'static str {
        match self {
            FormatTag::TurnPairs => "turn_pairs",
            FormatTag::RichConversation => "rich_conversation",
            FormatTag::RichExport => "rich_export",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Header describing a loaded document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub title: String,
    pub platform: String,
    pub format: FormatTag,
    pub source_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    pub message_count: usize,
    pub conversation_count: usize,
}

/// One conversation inside a document, as a half-open range of message indices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationScope {
    pub uuid: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub start: usize,
    pub end: usize,
}

impl ConversationScope {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A field that could not be extracted as expected; the message is kept with a default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Degradation {
    /// Index of the affected message, if one was being built
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_index: Option<usize>,
    pub field: String,
    pub detail: String,
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message_index {
            Some(index) => write!(f, "message #{} field '{}': {}", index, self.field, self.detail),
            None => write!(f, "field '{}': {}", self.field, self.detail),
        }
    }
}

/// Output of normalization: metadata plus the immutable canonical message list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDocument {
    pub metadata: DocumentMetadata,
    pub messages: Vec<CanonicalMessage>,
    pub conversations: Vec<ConversationScope>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degradations: Vec<Degradation>,
}

impl NormalizedDocument {
    /// Messages of the conversation at `scope`, or `None` if out of range
    pub fn conversation_messages(&self, scope: usize) -> Option<&[CanonicalMessage]> {
        let conversation = self.conversations.get(scope)?;
        self.messages.get(conversation.range())
    }

    pub fn is_multi_conversation(&self) -> bool {
        self.conversations.len() > 1
    }
}
