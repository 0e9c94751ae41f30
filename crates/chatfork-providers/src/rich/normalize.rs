use chatfork_types::*;
use serde_json::{Map, Value};
use tracing::debug;

use crate::builder::{DocumentBuilder, DocumentHeader, ScopeHeader};
use crate::detect::message_array;
use crate::error::{Error, Result};
use crate::extract::{FieldReader, type_name};
use crate::registry;
use crate::rich::artifacts::{build_artifact, is_artifact_tool};
use crate::rich::schema::*;

const HUMAN_LABEL: &str = "User";

const UUID_KEYS: &[&str] = &["uuid", "id"];
const PARENT_KEYS: &[&str] = &["parent_message_uuid", "parentUuid", "parent_uuid", "parent_id"];
const SENDER_KEYS: &[&str] = &["sender", "role"];
const TIMESTAMP_KEYS: &[&str] = &["created_at", "timestamp", "updated_at"];

/// Normalize one rich conversation object
pub(crate) fn normalize_rich_conversation(
    json: &Value,
    file_name: &str,
) -> Result<NormalizedDocument> {
    let Some(obj) = json.as_object() else {
        return Err(Error::UnsupportedFormat(
            "rich conversation must be an object".to_string(),
        ));
    };

    let mut builder = DocumentBuilder::new(file_name);
    let explicit_platform = FieldReader::new(obj, None, builder.diag()).opt_str(&["platform"]);
    let platform = registry::resolve_platform(
        explicit_platform.as_deref(),
        file_name,
        FormatTag::RichConversation,
    );

    let header = read_conversation(&mut builder, obj, &platform);
    debug!(
        file = file_name,
        messages = builder.next_index(),
        "normalized rich conversation"
    );

    Ok(builder.finish(
        FormatTag::RichConversation,
        DocumentHeader {
            title: header.name,
            platform,
            conversation_uuid: header.uuid,
            created_at: header.created_at,
            updated_at: header.updated_at,
            model: header.model,
            project: header.project,
            exported_at: None,
        },
    ))
}

/// Normalize a full export: every conversation becomes one scope, indices stay dense
/// across the whole document.
pub(crate) fn normalize_rich_export(json: &Value, file_name: &str) -> Result<NormalizedDocument> {
    let Some(items) = json.as_array() else {
        return Err(Error::UnsupportedFormat(
            "rich export must be an array of conversations".to_string(),
        ));
    };

    let mut builder = DocumentBuilder::new(file_name);
    let platform = registry::resolve_platform(None, file_name, FormatTag::RichExport);

    for (ordinal, item) in items.iter().enumerate() {
        let Some(obj) = item.as_object() else {
            builder.diag().degrade(
                None,
                &format!("[{}]", ordinal),
                format!("conversation is {}, expected object", type_name(item)),
            );
            continue;
        };
        read_conversation(&mut builder, obj, &platform);
    }

    debug!(
        file = file_name,
        conversations = items.len(),
        messages = builder.next_index(),
        "normalized rich export"
    );

    Ok(builder.finish(
        FormatTag::RichExport,
        DocumentHeader {
            platform,
            ..Default::default()
        },
    ))
}

#[derive(Debug, Default)]
struct ConversationHeader {
    uuid: Option<String>,
    name: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
    model: Option<String>,
    project: Option<String>,
}

/// Read a conversation header, open its scope and push all of its messages
fn read_conversation(
    builder: &mut DocumentBuilder,
    obj: &Map<String, Value>,
    platform: &str,
) -> ConversationHeader {
    let header = {
        let mut reader = FieldReader::new(obj, None, builder.diag());
        let project = match reader.get("project") {
            Some(Value::Object(project)) => project
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => reader.opt_str(&["project_name"]),
        };
        ConversationHeader {
            uuid: reader.opt_str(&["uuid", "id"]),
            name: reader.opt_str(&["name", "title"]),
            created_at: reader.opt_str(&["created_at"]),
            updated_at: reader.opt_str(&["updated_at"]),
            model: reader.opt_str(&["model"]),
            project,
        }
    };

    builder.open_conversation(ScopeHeader {
        uuid: header.uuid.clone(),
        title: header.name.clone(),
        created_at: header.created_at.clone(),
    });

    let messages: &[Value] = match message_array(obj) {
        Some(items) => items.as_slice(),
        None => {
            builder
                .diag()
                .degrade(None, "chat_messages", "conversation has no message array");
            &[]
        }
    };

    for (position, value) in messages.iter().enumerate() {
        let index = builder.next_index();
        let Some(message_obj) = value.as_object() else {
            builder.diag().degrade(
                None,
                &format!("chat_messages[{}]", position),
                format!("message is {}, expected object", type_name(value)),
            );
            continue;
        };
        let message = read_message(builder, message_obj, index, platform);
        builder.push(message);
    }

    header
}

fn read_message(
    builder: &mut DocumentBuilder,
    obj: &Map<String, Value>,
    index: usize,
    platform: &str,
) -> CanonicalMessage {
    let mut reader = FieldReader::new(obj, Some(index), builder.diag());

    let mut uuid = reader.req_str(UUID_KEYS);
    if uuid.is_empty() {
        uuid = format!("message_{}", index);
    }

    let sender = match reader.opt_str(SENDER_KEYS).as_deref().map(Sender::from_source) {
        Some(Some(sender)) => sender,
        Some(None) => {
            reader.degrade("sender", "unrecognized sender, assuming human");
            Sender::Human
        }
        None => {
            reader.degrade("sender", "missing sender, assuming human");
            Sender::Human
        }
    };

    let mut message = CanonicalMessage::new(index, uuid, sender);
    message.parent_uuid = reader.opt_str(PARENT_KEYS).unwrap_or_default();
    message.timestamp = reader.opt_str(TIMESTAMP_KEYS).unwrap_or_default();
    message.sender_label = match sender {
        Sender::Human => HUMAN_LABEL.to_string(),
        Sender::Assistant => platform.to_string(),
    };

    let mut content = ContentAccumulator::default();
    for (position, segment) in reader.list("content").iter().enumerate() {
        let field = format!("content[{}]", position);
        if let Some(segment) = reader.typed::<Segment>(&field, segment) {
            content.apply(segment, &field, &mut reader);
        }
    }
    content.finish_into(&mut message);

    if message.display_text.is_empty()
        && let Some(text) = reader.opt_str(&["text"])
    {
        message.display_text = text.trim_end().to_string();
    }

    for (position, value) in reader.list("attachments").iter().enumerate() {
        let field = format!("attachments[{}]", position);
        if let Some(raw) = reader.typed::<RawAttachment>(&field, value) {
            message.attachments.push(attachment(raw));
        }
    }

    for key in ["files", "files_v2"] {
        for (position, value) in reader.list(key).iter().enumerate() {
            let field = format!("{}[{}]", key, position);
            let Some(raw) = reader.typed::<RawFile>(&field, value) else {
                continue;
            };
            if raw.is_image() {
                push_unique_image(&mut message.images, raw);
            } else if let Some(file_name) = raw.file_name {
                message.attachments.push(Attachment {
                    file_name,
                    file_type: raw.file_kind,
                    file_size: None,
                    extracted_content: None,
                });
            }
        }
    }

    message
}

/// Which record a following `tool_result` attaches to
#[derive(Debug, Clone, Copy)]
enum LastRecord {
    Tool(usize),
    Artifact(usize),
}

/// Folds a message's segments into its text, thinking, tools, artifacts and citations
#[derive(Debug, Default)]
struct ContentAccumulator {
    text: String,
    thinking: Option<String>,
    tools: Vec<ToolInvocation>,
    artifacts: Vec<Artifact>,
    citations: Vec<Citation>,
    last: Option<LastRecord>,
}

impl ContentAccumulator {
    fn apply(&mut self, segment: Segment, field: &str, reader: &mut FieldReader<'_, '_>) {
        match segment {
            Segment::Text { text, citations } => {
                if let Some(text) = text {
                    self.text.push_str(&text);
                }
                for (position, raw) in citations.unwrap_or_default().iter().enumerate() {
                    let citation_field = format!("{}.citations[{}]", field, position);
                    if let Some(raw) = reader.typed::<RawCitation>(&citation_field, raw) {
                        self.citations.push(citation(raw));
                    }
                }
            }
            Segment::Thinking { thinking } => {
                // Last thinking segment wins; the source never nests them
                self.thinking = Some(thinking.unwrap_or_default().trim().to_string());
            }
            Segment::ToolUse { name, input } => {
                let name = name.unwrap_or_default();
                if is_artifact_tool(&name) {
                    self.push_artifact(name, input, field, reader);
                } else {
                    self.push_tool(name, input);
                }
            }
            Segment::ToolResult { content, is_error } => {
                let result = ToolResult {
                    is_error: is_error.unwrap_or(false),
                    content: flatten_result_content(&content),
                };
                match self.last {
                    Some(LastRecord::Tool(i)) => self.tools[i].result = Some(result),
                    Some(LastRecord::Artifact(i)) => self.artifacts[i].result = Some(result),
                    None => reader.degrade(field, "tool_result without a preceding tool_use"),
                }
            }
            Segment::Unknown => {}
        }
    }

    fn push_tool(&mut self, name: String, input: Value) {
        let query = input
            .get("query")
            .and_then(Value::as_str)
            .map(str::to_string);
        self.tools.push(ToolInvocation {
            name,
            input,
            query,
            result: None,
        });
        self.last = Some(LastRecord::Tool(self.tools.len() - 1));
    }

    fn push_artifact(
        &mut self,
        name: String,
        input: Value,
        field: &str,
        reader: &mut FieldReader<'_, '_>,
    ) {
        let input_field = format!("{}.input", field);
        let Some(parsed) = reader.typed::<ArtifactInput>(&input_field, &input) else {
            // Keep the call visible as a plain tool rather than dropping it
            self.push_tool(name, input);
            return;
        };

        let (artifact, problems) = build_artifact(parsed);
        for (key, detail) in problems {
            reader.degrade(&format!("{}.{}", input_field, key), detail);
        }
        self.artifacts.push(artifact);
        self.last = Some(LastRecord::Artifact(self.artifacts.len() - 1));
    }

    fn finish_into(self, message: &mut CanonicalMessage) {
        message.display_text = self.text.trim_end().to_string();
        message.thinking = self.thinking.unwrap_or_default();
        message.tools = self.tools;
        message.artifacts = self.artifacts;
        message.citations = self.citations;
    }
}

fn citation(raw: RawCitation) -> Citation {
    let (detail_url, detail_title) = match raw.details {
        Some(details) => (details.url, details.title),
        None => (None, None),
    };
    Citation {
        uuid: raw.uuid,
        title: raw.title.or(detail_title),
        url: raw.url.or(detail_url),
        start_index: raw.start_index,
        end_index: raw.end_index,
    }
}

fn attachment(raw: RawAttachment) -> Attachment {
    Attachment {
        file_name: raw.file_name.unwrap_or_default(),
        file_type: raw.file_type,
        file_size: raw.file_size,
        extracted_content: raw.extracted_content,
    }
}

/// `files` and `files_v2` usually list the same image twice
fn push_unique_image(images: &mut Vec<ImageRef>, raw: RawFile) {
    if let Some(file_uuid) = &raw.file_uuid
        && images
            .iter()
            .any(|img| img.file_uuid.as_ref() == Some(file_uuid))
    {
        return;
    }
    images.push(ImageRef {
        file_name: raw.file_name,
        file_uuid: raw.file_uuid,
        url: raw.preview_url.or(raw.thumbnail_url),
    });
}

/// Flatten tool result content into readable text
fn flatten_result_content(content: &Value) -> String {
    match content {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_result_item)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        other => flatten_result_item(other),
    }
}

fn flatten_result_item(item: &Value) -> String {
    match item {
        Value::String(text) => text.clone(),
        Value::Object(obj) => {
            if let Some(text) = obj.get("text").and_then(Value::as_str) {
                return text.to_string();
            }
            let title = obj.get("title").and_then(Value::as_str);
            let url = obj.get("url").and_then(Value::as_str);
            match (title, url) {
                (Some(title), Some(url)) => format!("{} <{}>", title, url),
                (Some(title), None) => title.to_string(),
                (None, Some(url)) => format!("<{}>", url),
                (None, None) => String::new(),
            }
        }
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
