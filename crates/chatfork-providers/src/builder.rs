use chatfork_types::*;
use uuid::Uuid;

use crate::extract::Diagnostics;
use crate::registry;

/// Header fields an adapter reads from its source before building the document
#[derive(Debug, Clone, Default)]
pub(crate) struct DocumentHeader {
    pub title: Option<String>,
    pub platform: String,
    pub conversation_uuid: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub model: Option<String>,
    pub project: Option<String>,
    pub exported_at: Option<String>,
}

/// Header of one conversation scope inside a document
#[derive(Debug, Clone, Default)]
pub(crate) struct ScopeHeader {
    pub uuid: Option<String>,
    pub title: Option<String>,
    pub created_at: Option<String>,
}

struct OpenScope {
    header: ScopeHeader,
    start: usize,
}

/// DocumentBuilder accumulates canonical messages and conversation scopes.
///
/// Owns the dense `index` counter: adapters ask for the next index and push messages
/// in document order.
pub(crate) struct DocumentBuilder {
    file_name: String,
    messages: Vec<CanonicalMessage>,
    conversations: Vec<ConversationScope>,
    open: Option<OpenScope>,
    diag: Diagnostics,
}

impl DocumentBuilder {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            messages: Vec::new(),
            conversations: Vec::new(),
            open: None,
            diag: Diagnostics::default(),
        }
    }

    pub fn next_index(&self) -> usize {
        self.messages.len()
    }

    pub fn diag(&mut self) -> &mut Diagnostics {
        &mut self.diag
    }

    pub fn push(&mut self, message: CanonicalMessage) {
        debug_assert_eq!(message.index, self.messages.len());
        self.messages.push(message);
    }

    /// Start a new conversation scope, closing the previous one
    pub fn open_conversation(&mut self, header: ScopeHeader) {
        self.close_conversation();
        self.open = Some(OpenScope {
            header,
            start: self.messages.len(),
        });
    }

    pub fn close_conversation(&mut self) {
        let Some(open) = self.open.take() else {
            return;
        };
        let ordinal = self.conversations.len();
        let uuid = open
            .header
            .uuid
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| self.synthesize_uuid(ordinal));
        let title = open
            .header
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format!("Conversation {}", ordinal + 1));

        self.conversations.push(ConversationScope {
            uuid,
            title,
            created_at: open.header.created_at,
            start: open.start,
            end: self.messages.len(),
        });
    }

    /// Deterministic conversation id for sources that carry none
    fn synthesize_uuid(&self, ordinal: usize) -> String {
        let name = format!("{}#{}", self.file_name, ordinal);
        Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
    }

    pub fn finish(mut self, format: FormatTag, header: DocumentHeader) -> NormalizedDocument {
        self.close_conversation();

        let title = header
            .title
            .filter(|t| !t.trim().is_empty())
            .or_else(|| registry::title_from_file_name(&self.file_name))
            .unwrap_or_else(|| "Untitled".to_string());

        let metadata = DocumentMetadata {
            title,
            platform: header.platform,
            format,
            source_file: self.file_name,
            conversation_uuid: header.conversation_uuid,
            created_at: header.created_at,
            updated_at: header.updated_at,
            model: header.model,
            project: header.project,
            exported_at: header.exported_at,
            message_count: self.messages.len(),
            conversation_count: self.conversations.len(),
        };

        NormalizedDocument {
            metadata,
            messages: self.messages,
            conversations: self.conversations,
            degradations: self.diag.into_inner(),
        }
    }
}
