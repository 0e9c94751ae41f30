use chatfork_types::NormalizedDocument;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use crate::detect::detect_or_err;
use crate::error::Result;
use crate::registry::create_adapter;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse, detect and normalize a document held in memory.
///
/// `file_name` only feeds platform and title fallbacks.
pub fn load_str(text: &str, file_name: &str) -> Result<NormalizedDocument> {
    load_bytes(text.as_bytes(), file_name)
}

/// Parse raw file contents; a leading UTF-8 byte-order mark is skipped and
/// invalid UTF-8 is a malformed document, not an IO failure
fn load_bytes(bytes: &[u8], file_name: &str) -> Result<NormalizedDocument> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let json: Value = serde_json::from_slice(bytes)?;
    load_value(&json, file_name)
}

/// Detect and normalize an already decoded document
pub fn load_value(json: &Value, file_name: &str) -> Result<NormalizedDocument> {
    let tag = detect_or_err(json)?;
    debug!(file = file_name, format = %tag, "detected document format");

    let doc = create_adapter(tag).normalize(json, file_name)?;
    info!(
        file = file_name,
        format = %tag,
        messages = doc.messages.len(),
        conversations = doc.conversations.len(),
        degradations = doc.degradations.len(),
        "loaded document"
    );
    Ok(doc)
}

/// Read and normalize a document from disk
pub fn load_file(path: &Path) -> Result<NormalizedDocument> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    load_bytes(&bytes, file_name)
}
