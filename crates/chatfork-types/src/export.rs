use serde::{Deserialize, Serialize};

/// Which optional fields an exporter should carry.
///
/// Supplied by the caller; the core only guarantees the message shape these flags refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub include_thinking: bool,
    pub include_artifacts: bool,
    pub include_tools: bool,
    pub include_citations: bool,
    pub include_timestamps: bool,
    pub export_marked_only: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_thinking: true,
            include_artifacts: true,
            include_tools: true,
            include_citations: true,
            include_timestamps: true,
            export_marked_only: false,
        }
    }
}
