use chatfork_types::{FormatTag, NormalizedDocument};
use serde_json::Value;

use crate::Result;

/// Schema adapter for one export format
///
/// Responsibilities:
/// - Read a decoded document of its own format
/// - Assign dense indices and canonical fields to every message
/// - Record per-field problems as degradations instead of failing
pub trait FormatAdapter: Send + Sync {
    /// Format this adapter reads
    fn tag(&self) -> FormatTag;

    /// Normalize a document already classified as [`FormatAdapter::tag`]
    fn normalize(&self, json: &Value, file_name: &str) -> Result<NormalizedDocument>;
}
