//! Fixtures for sample data and synthetic export documents.
//!
//! Provides utilities to:
//! - Locate and copy the checked-in sample exports
//! - Build minimal documents of every supported format in code

use anyhow::Result;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

/// Sample file manager for test data.
pub struct SampleFiles {
    samples_dir: PathBuf,
}

impl Default for SampleFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleFiles {
    /// Create a new sample file manager.
    ///
    /// Assumes samples are in `crates/chatfork-providers/tests/samples/`.
    pub fn new() -> Self {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let samples_dir = manifest_dir
            .parent()
            .unwrap_or(&manifest_dir)
            .join("chatfork-providers/tests/samples");

        Self { samples_dir }
    }

    /// Absolute path of a sample file.
    pub fn path(&self, sample_name: &str) -> PathBuf {
        self.samples_dir.join(sample_name)
    }

    /// Copy a sample file to a destination.
    pub fn copy_to(&self, sample_name: &str, dest: &Path) -> Result<()> {
        fs::copy(self.path(sample_name), dest)?;
        Ok(())
    }
}

/// One rich-format message with plain text content.
///
/// `parent` of `""` leaves the parent field out entirely.
pub fn rich_message(uuid: &str, parent: &str, sender: &str, text: &str, created_at: &str) -> Value {
    let mut message = json!({
        "uuid": uuid,
        "sender": sender,
        "created_at": created_at,
        "content": [{"type": "text", "text": text}],
    });
    if !parent.is_empty() {
        message["parent_message_uuid"] = json!(parent);
    }
    message
}

/// A single rich conversation wrapping `messages`.
pub fn rich_conversation(uuid: &str, name: &str, messages: Vec<Value>) -> Value {
    json!({
        "uuid": uuid,
        "name": name,
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T01:00:00Z",
        "chat_messages": messages,
    })
}

/// A full account export of several conversations.
pub fn rich_export(conversations: Vec<Value>) -> Value {
    Value::Array(conversations)
}

/// A bare turn-pair array; `None` omits that side.
pub fn turn_pairs(pairs: &[(Option<&str>, Option<&str>)]) -> Value {
    let items = pairs
        .iter()
        .map(|(human, assistant)| {
            let mut item = json!({});
            if let Some(human) = human {
                item["human"] = json!(human);
            }
            if let Some(assistant) = assistant {
                item["assistant"] = json!(assistant);
            }
            item
        })
        .collect();
    Value::Array(items)
}

/// Conversation with one fork: `u1` is answered by `a1` and by the regenerated `a2`.
pub fn forked_conversation() -> Value {
    rich_conversation(
        "conv-fork",
        "Forked chat",
        vec![
            rich_message("u1", "", "human", "What is a fork?", "2025-01-01T00:00:00Z"),
            rich_message("a1", "u1", "assistant", "First answer", "2025-01-01T00:00:05Z"),
            rich_message("a2", "u1", "assistant", "Second answer", "2025-01-01T00:01:00Z"),
            rich_message("u2", "a2", "human", "Thanks", "2025-01-01T00:02:00Z"),
        ],
    )
}
