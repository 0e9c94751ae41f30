use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Human,
    Assistant,
}

impl Sender {
    /// Parse a source `sender`/`role` value; `user` is accepted as human.
    pub fn from_source(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "human" | "user" => Some(Sender::Human),
            "assistant" | "model" | "ai" => Some(Sender::Assistant),
            _ => None,
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::Human => write!(f, "human"),
            Sender::Assistant => write!(f, "assistant"),
        }
    }
}

/// Normalized, format-agnostic message record.
///
/// Created once per loaded document and never mutated afterwards. `index` is the
/// external identity (marks, search, export); `uuid`/`parent_uuid` are the graph identity.
/// Branch information lives in a separate annotation map built by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalMessage {
    pub index: usize,
    pub uuid: String,
    /// Empty means "root of its conversation"
    #[serde(default)]
    pub parent_uuid: String,
    pub sender: Sender,
    pub sender_label: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub display_text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub thinking: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolInvocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl CanonicalMessage {
    /// Bare message with empty content, used as the starting point by adapters.
    pub fn new(index: usize, uuid: impl Into<String>, sender: Sender) -> Self {
        Self {
            index,
            uuid: uuid.into(),
            parent_uuid: String::new(),
            sender,
            sender_label: String::new(),
            timestamp: String::new(),
            display_text: String::new(),
            thinking: String::new(),
            tools: Vec::new(),
            artifacts: Vec::new(),
            citations: Vec::new(),
            images: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<&str> {
        if self.parent_uuid.is_empty() {
            None
        } else {
            Some(&self.parent_uuid)
        }
    }

    pub fn has_thinking(&self) -> bool {
        !self.thinking.is_empty()
    }
}

/// Generic (non-artifact) tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInvocation {
    pub name: String,
    #[serde(default)]
    pub input: Value,
    /// Captured `query` argument of search-type tools
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ToolResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub content: String,
}

/// Operation an artifact tool call performs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArtifactCommand {
    Create,
    Update,
    Rewrite,
    Other(String),
}

impl From<String> for ArtifactCommand {
    fn from(value: String) -> Self {
        match value.as_str() {
            "create" => ArtifactCommand::Create,
            "update" => ArtifactCommand::Update,
            "rewrite" => ArtifactCommand::Rewrite,
            _ => ArtifactCommand::Other(value),
        }
    }
}

impl From<ArtifactCommand> for String {
    fn from(value: ArtifactCommand) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ArtifactCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactCommand::Create => write!(f, "create"),
            ArtifactCommand::Update => write!(f, "update"),
            ArtifactCommand::Rewrite => write!(f, "rewrite"),
            ArtifactCommand::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Either the full artifact text or an in-place edit.
///
/// A diff body has no `content`/`language` at all, so a missing create is never
/// masked by empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ArtifactBody {
    #[serde(rename_all = "camelCase")]
    Full {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Diff { old_str: String, new_str: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub id: String,
    pub command: ArtifactCommand,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub artifact_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: ArtifactBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ToolResult>,
}

impl Artifact {
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            ArtifactBody::Full { content, .. } => Some(content),
            ArtifactBody::Diff { .. } => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match &self.body {
            ArtifactBody::Full { language, .. } => language.as_deref(),
            ArtifactBody::Diff { .. } => None,
        }
    }

    /// `(old_str, new_str)` for edit bodies
    pub fn diff(&self) -> Option<(&str, &str)> {
        match &self.body {
            ArtifactBody::Diff { old_str, new_str } => Some((old_str, new_str)),
            ArtifactBody::Full { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_index: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_content: Option<String>,
}
