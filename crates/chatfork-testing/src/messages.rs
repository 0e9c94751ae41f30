//! Canonical message trees for engine tests.

use chatfork_types::{CanonicalMessage, Sender};

/// Builder for a dense list of canonical messages.
///
/// Messages get indices in insertion order; senders alternate by default so
/// trees read like conversations.
///
/// # Example
/// ```
/// use chatfork_testing::MessageTree;
///
/// let messages = MessageTree::new()
///     .root("m0", "2025-01-01T00:00:00Z")
///     .reply("m1", "m0", "2025-01-01T00:00:01Z")
///     .build();
/// assert_eq!(messages[1].parent_uuid, "m0");
/// ```
#[derive(Debug, Default)]
pub struct MessageTree {
    messages: Vec<CanonicalMessage>,
}

impl MessageTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message without a parent.
    pub fn root(self, uuid: &str, timestamp: &str) -> Self {
        self.reply(uuid, "", timestamp)
    }

    /// Add a message whose parent is `parent` (which need not exist).
    pub fn reply(mut self, uuid: &str, parent: &str, timestamp: &str) -> Self {
        let index = self.messages.len();
        let sender = if index % 2 == 0 {
            Sender::Human
        } else {
            Sender::Assistant
        };
        let mut message = CanonicalMessage::new(index, uuid, sender);
        message.parent_uuid = parent.to_string();
        message.timestamp = timestamp.to_string();
        message.display_text = format!("message {}", uuid);
        message.sender_label = match sender {
            Sender::Human => "User".to_string(),
            Sender::Assistant => "Claude".to_string(),
        };
        self.messages.push(message);
        self
    }

    /// Replace the display text of the most recently added message.
    pub fn text(mut self, text: &str) -> Self {
        if let Some(last) = self.messages.last_mut() {
            last.display_text = text.to_string();
        }
        self
    }

    pub fn build(self) -> Vec<CanonicalMessage> {
        self.messages
    }
}

/// Linear chain `m0 -> m1 -> ...` with one-second spacing.
pub fn chain(len: usize) -> Vec<CanonicalMessage> {
    let mut tree = MessageTree::new();
    for i in 0..len {
        let parent = if i == 0 {
            String::new()
        } else {
            format!("m{}", i - 1)
        };
        tree = tree.reply(&format!("m{}", i), &parent, &seconds(i as u32));
    }
    tree.build()
}

/// RFC3339 timestamp `n` seconds after a fixed epoch.
pub fn seconds(n: u32) -> String {
    format!("2025-01-01T00:{:02}:{:02}Z", n / 60, n % 60)
}

/// Uuids of a message slice, for compact assertions.
pub fn uuids(messages: &[CanonicalMessage]) -> Vec<&str> {
    messages.iter().map(|m| m.uuid.as_str()).collect()
}
