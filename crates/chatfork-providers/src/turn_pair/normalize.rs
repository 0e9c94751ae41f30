use chatfork_types::*;
use serde_json::Value;
use tracing::debug;

use crate::builder::{DocumentBuilder, DocumentHeader, ScopeHeader};
use crate::detect::TURN_PAIR_WRAPPER_KEY;
use crate::error::{Error, Result};
use crate::extract::FieldReader;
use crate::registry;
use crate::turn_pair::schema::{ImageSource, TurnSide};

const HUMAN_LABEL: &str = "User";

/// Normalize a turn-pair export.
///
/// Each element emits at most one human message followed by at most one assistant
/// message, so no message ever has more than one child.
pub(crate) fn normalize_turn_pairs(json: &Value, file_name: &str) -> Result<NormalizedDocument> {
    let mut builder = DocumentBuilder::new(file_name);

    let (pairs, title, platform, exported_at) = match json {
        Value::Array(items) => (items.as_slice(), None, None, None),
        Value::Object(obj) => {
            let mut reader = FieldReader::new(obj, None, builder.diag());
            let title = reader.opt_str(&["title"]);
            let platform = reader.opt_str(&["platform"]);
            let exported_at = reader.opt_str(&["exportedAt", "exported_at"]);
            let pairs = reader.list(TURN_PAIR_WRAPPER_KEY);
            (pairs, title, platform, exported_at)
        }
        _ => {
            return Err(Error::UnsupportedFormat(
                "turn-pair document must be an array or an object".to_string(),
            ));
        }
    };

    let platform = registry::resolve_platform(platform.as_deref(), file_name, FormatTag::TurnPairs);

    builder.open_conversation(ScopeHeader {
        uuid: None,
        title: title.clone(),
        created_at: exported_at.clone(),
    });

    for (element_index, element) in pairs.iter().enumerate() {
        let Some(obj) = element.as_object() else {
            builder.diag().degrade(
                None,
                &format!("[{}]", element_index),
                "turn pair is not an object",
            );
            continue;
        };

        let (timestamp, human, assistant) = {
            let mut reader = FieldReader::new(obj, None, builder.diag());
            let timestamp = reader
                .opt_str(&["timestamp", "created_at"])
                .unwrap_or_default();
            let human = read_side(&mut reader, element_index, "human");
            let assistant = read_side(&mut reader, element_index, "assistant");
            (timestamp, human, assistant)
        };

        let mut human_uuid = String::new();

        if let Some(side) = human.filter(has_content) {
            let uuid = format!("human_{}", element_index);
            let mut message = side_message(builder.next_index(), &uuid, Sender::Human, &side);
            message.sender_label = HUMAN_LABEL.to_string();
            message.timestamp = timestamp.clone();
            builder.push(message);
            human_uuid = uuid;
        }

        if let Some(side) = assistant.filter(has_content) {
            let uuid = format!("assistant_{}", element_index);
            let mut message = side_message(builder.next_index(), &uuid, Sender::Assistant, &side);
            message.parent_uuid = human_uuid;
            message.sender_label = platform.clone();
            message.timestamp = timestamp;
            builder.push(message);
        }
    }

    debug!(
        file = file_name,
        turns = pairs.len(),
        messages = builder.next_index(),
        "normalized turn-pair document"
    );

    Ok(builder.finish(
        FormatTag::TurnPairs,
        DocumentHeader {
            title,
            platform,
            exported_at,
            ..Default::default()
        },
    ))
}

fn read_side(reader: &mut FieldReader<'_, '_>, element_index: usize, key: &'static str) -> Option<TurnSide> {
    let value = reader.get(key)?;
    reader.typed::<TurnSide>(&format!("[{}].{}", element_index, key), value)
}

fn has_content(side: &TurnSide) -> bool {
    !side.text().trim().is_empty() || !side.images().is_empty()
}

fn side_message(index: usize, uuid: &str, sender: Sender, side: &TurnSide) -> CanonicalMessage {
    let mut message = CanonicalMessage::new(index, uuid, sender);
    message.display_text = side.text().trim_end().to_string();
    message.images = side.images().iter().filter_map(image_ref).collect();
    message
}

fn image_ref(source: &ImageSource) -> Option<ImageRef> {
    match source {
        ImageSource::Url(url) if !url.is_empty() => Some(ImageRef {
            url: Some(url.clone()),
            ..Default::default()
        }),
        ImageSource::Url(_) => None,
        ImageSource::Object { url, name } => {
            if url.is_none() && name.is_none() {
                return None;
            }
            Some(ImageRef {
                file_name: name.clone(),
                file_uuid: None,
                url: url.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assistant_parent_is_same_element_human() {
        let doc = normalize_turn_pairs(
            &json!([
                {"human": "hi", "assistant": "hello"},
                {"assistant": "unprompted"}
            ]),
            "chat.json",
        )
        .expect("normalizes");

        let uuids: Vec<&str> = doc.messages.iter().map(|m| m.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["human_0", "assistant_0", "assistant_1"]);
        assert_eq!(doc.messages[1].parent_uuid, "human_0");
        assert_eq!(doc.messages[2].parent_uuid, "");
    }

    #[test]
    fn test_empty_sides_are_skipped_but_uuid_keeps_element_index() {
        let doc = normalize_turn_pairs(
            &json!([
                {"human": "  ", "assistant": ""},
                {"human": "second", "assistant": "reply"}
            ]),
            "chat.json",
        )
        .expect("normalizes");

        assert_eq!(doc.messages.len(), 2);
        assert_eq!(doc.messages[0].index, 0);
        assert_eq!(doc.messages[0].uuid, "human_1");
        assert_eq!(doc.messages[1].uuid, "assistant_1");
    }

    #[test]
    fn test_wrapped_document_reads_header() {
        let doc = normalize_turn_pairs(
            &json!({
                "title": "Trip planning",
                "platform": "NotebookLM",
                "exportedAt": "2025-01-02T03:04:05Z",
                "conversation": [
                    {"human": {"text": "look", "images": ["https://img/1.png"]}, "assistant": "nice"}
                ]
            }),
            "export.json",
        )
        .expect("normalizes");

        assert_eq!(doc.metadata.title, "Trip planning");
        assert_eq!(doc.metadata.platform, "NotebookLM");
        assert_eq!(doc.metadata.exported_at.as_deref(), Some("2025-01-02T03:04:05Z"));
        assert_eq!(doc.messages[0].images.len(), 1);
        assert_eq!(doc.messages[1].sender_label, "NotebookLM");
    }

    #[test]
    fn test_wrong_typed_side_degrades() {
        let doc = normalize_turn_pairs(
            &json!([{"human": 42, "assistant": "still here"}]),
            "gemini.json",
        )
        .expect("normalizes");

        assert_eq!(doc.messages.len(), 1);
        assert_eq!(doc.messages[0].sender, Sender::Assistant);
        assert_eq!(doc.messages[0].sender_label, "Gemini");
        assert_eq!(doc.degradations.len(), 1);
        assert_eq!(doc.degradations[0].field, "[0].human");
    }
}
