pub(crate) mod artifacts;
pub(crate) mod normalize;
pub(crate) mod schema;

use chatfork_types::{FormatTag, NormalizedDocument};
use serde_json::Value;

use crate::Result;

/// Adapter for a single conversation object with segmented message content
pub struct RichConversationAdapter;

impl crate::traits::FormatAdapter for RichConversationAdapter {
    fn tag(&self) -> FormatTag {
        FormatTag::RichConversation
    }

    fn normalize(&self, json: &Value, file_name: &str) -> Result<NormalizedDocument> {
        normalize::normalize_rich_conversation(json, file_name)
    }
}

/// Adapter for a full account export (array of rich conversations)
pub struct RichExportAdapter;

impl crate::traits::FormatAdapter for RichExportAdapter {
    fn tag(&self) -> FormatTag {
        FormatTag::RichExport
    }

    fn normalize(&self, json: &Value, file_name: &str) -> Result<NormalizedDocument> {
        normalize::normalize_rich_export(json, file_name)
    }
}
