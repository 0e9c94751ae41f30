use serde::Deserialize;
use serde_json::Value;

/// One typed segment of a message's `content` list
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub(crate) enum Segment {
    Text {
        #[serde(default)]
        text: Option<String>,
        /// Kept raw so one malformed citation only drops itself
        #[serde(default)]
        citations: Option<Vec<Value>>,
    },
    Thinking {
        #[serde(default)]
        thinking: Option<String>,
    },
    ToolUse {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        input: Value,
    },
    ToolResult {
        #[serde(default)]
        content: Value,
        #[serde(default)]
        is_error: Option<bool>,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct RawCitation {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub start_index: Option<u64>,
    #[serde(default)]
    pub end_index: Option<u64>,
    #[serde(default)]
    pub details: Option<CitationDetails>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct CitationDetails {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Structured input of the `artifacts` tool
#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct ArtifactInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default, rename = "type")]
    pub artifact_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub old_str: Option<String>,
    #[serde(default)]
    pub new_str: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct RawAttachment {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub extracted_content: Option<String>,
}

/// Entry of `files` / `files_v2`
#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct RawFile {
    #[serde(default)]
    pub file_kind: Option<String>,
    #[serde(default)]
    pub file_uuid: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl RawFile {
    pub fn is_image(&self) -> bool {
        self.file_kind.as_deref() == Some("image")
    }
}
