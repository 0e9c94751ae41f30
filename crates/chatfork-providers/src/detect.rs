use chatfork_types::FormatTag;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Keys that hold the per-message array of a rich conversation, in preference order
pub(crate) const MESSAGE_ARRAY_KEYS: &[&str] = &["chat_messages", "messages"];

/// Key of the turn-pair array inside a wrapped turn-pair document
pub(crate) const TURN_PAIR_WRAPPER_KEY: &str = "conversation";

/// Classify a decoded document by structural sniffing.
///
/// Pure inspection of the top-level shape; deep correctness is left to the adapters.
/// Returns `None` when no known schema matches.
pub fn detect(json: &Value) -> Option<FormatTag> {
    match json {
        Value::Array(items) => {
            let first = first_object(items)?;
            if is_turn_pair(first) {
                Some(FormatTag::TurnPairs)
            } else if first.get("chat_messages").is_some_and(Value::is_array) {
                Some(FormatTag::RichExport)
            } else {
                None
            }
        }
        Value::Object(obj) => {
            if let Some(Value::Array(pairs)) = obj.get(TURN_PAIR_WRAPPER_KEY)
                && first_object(pairs).is_some_and(is_turn_pair)
            {
                return Some(FormatTag::TurnPairs);
            }
            message_array(obj).map(|_| FormatTag::RichConversation)
        }
        _ => None,
    }
}

/// Like [`detect`], but an unknown shape is a load error describing what was seen.
pub fn detect_or_err(json: &Value) -> Result<FormatTag> {
    detect(json).ok_or_else(|| Error::UnsupportedFormat(describe_shape(json)))
}

/// Locate the per-message array of a rich conversation object
pub(crate) fn message_array(obj: &Map<String, Value>) -> Option<&Vec<Value>> {
    MESSAGE_ARRAY_KEYS.iter().find_map(|key| match obj.get(*key) {
        Some(Value::Array(items)) if items.is_empty() || first_object(items).is_some() => {
            Some(items)
        }
        _ => None,
    })
}

fn first_object(items: &[Value]) -> Option<&Map<String, Value>> {
    items.iter().find_map(Value::as_object)
}

fn is_turn_pair(obj: &Map<String, Value>) -> bool {
    obj.contains_key("human") || obj.contains_key("assistant")
}

fn describe_shape(json: &Value) -> String {
    match json {
        Value::Array(items) if items.is_empty() => "empty top-level array".to_string(),
        Value::Array(items) => match first_object(items) {
            Some(obj) => format!(
                "array elements have no recognized keys (saw: {})",
                key_list(obj)
            ),
            None => "top-level array contains no objects".to_string(),
        },
        Value::Object(obj) => format!(
            "object has no message array (saw: {})",
            key_list(obj)
        ),
        Value::Null => "document is null".to_string(),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            "document is a scalar, expected an array or object".to_string()
        }
    }
}

fn key_list(obj: &Map<String, Value>) -> String {
    let keys: Vec<&str> = obj.keys().take(8).map(String::as_str).collect();
    if keys.is_empty() {
        "no keys".to_string()
    } else {
        keys.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_turn_pairs() {
        let doc = json!([{"human": "hi", "assistant": "hello"}]);
        assert_eq!(detect(&doc), Some(FormatTag::TurnPairs));

        let assistant_only = json!([{"assistant": "hello"}]);
        assert_eq!(detect(&assistant_only), Some(FormatTag::TurnPairs));
    }

    #[test]
    fn test_detect_wrapped_turn_pairs() {
        let doc = json!({"title": "x", "platform": "Gemini", "conversation": [{"human": "hi"}]});
        assert_eq!(detect(&doc), Some(FormatTag::TurnPairs));
    }

    #[test]
    fn test_detect_rich_conversation() {
        let doc = json!({"uuid": "c1", "chat_messages": [{"uuid": "m1", "sender": "human"}]});
        assert_eq!(detect(&doc), Some(FormatTag::RichConversation));

        let alt_key = json!({"messages": [{"uuid": "m1"}]});
        assert_eq!(detect(&alt_key), Some(FormatTag::RichConversation));

        let empty = json!({"chat_messages": []});
        assert_eq!(detect(&empty), Some(FormatTag::RichConversation));
    }

    #[test]
    fn test_detect_rich_export() {
        let doc = json!([{"uuid": "c1", "chat_messages": []}]);
        assert_eq!(detect(&doc), Some(FormatTag::RichExport));
    }

    #[test]
    fn test_detect_unknown_shapes() {
        assert_eq!(detect(&json!([])), None);
        assert_eq!(detect(&json!([1, 2, 3])), None);
        assert_eq!(detect(&json!({"foo": "bar"})), None);
        assert_eq!(detect(&json!({"messages": ["a", "b"]})), None);
        assert_eq!(detect(&json!("text")), None);
    }

    #[test]
    fn test_detect_or_err_describes_shape() {
        let err = detect_or_err(&json!({"foo": 1})).unwrap_err();
        assert!(err.to_string().contains("foo"));
        assert_eq!(err.kind(), crate::error::ErrorKind::UnsupportedFormat);
    }
}
