use chatfork_types::FormatTag;
use std::path::Path;

use crate::rich::{RichConversationAdapter, RichExportAdapter};
use crate::traits::FormatAdapter;
use crate::turn_pair::TurnPairAdapter;

#[derive(Debug, Clone)]
pub struct FormatMetadata {
    pub tag: FormatTag,
    pub description: &'static str,
    pub default_platform: &'static str,
}

const FORMATS: &[FormatMetadata] = &[
    FormatMetadata {
        tag: FormatTag::TurnPairs,
        description: "Array of human/assistant turn pairs",
        default_platform: "AI",
    },
    FormatMetadata {
        tag: FormatTag::RichConversation,
        description: "Single conversation with segmented message content",
        default_platform: "Claude",
    },
    FormatMetadata {
        tag: FormatTag::RichExport,
        description: "Full account export of rich conversations",
        default_platform: "Claude",
    },
];

/// File-name fragments that identify the exporting platform.
/// More specific fragments come first.
const PLATFORM_HINTS: &[(&str, &str)] = &[
    ("notebooklm", "NotebookLM"),
    ("aistudio", "AI Studio"),
    ("ai_studio", "AI Studio"),
    ("ai-studio", "AI Studio"),
    ("gemini", "Gemini"),
    ("chatgpt", "ChatGPT"),
    ("grok", "Grok"),
    ("claude", "Claude"),
];

pub fn get_all_formats() -> &'static [FormatMetadata] {
    FORMATS
}

pub fn get_format_metadata(tag: FormatTag) -> &'static FormatMetadata {
    FORMATS
        .iter()
        .find(|f| f.tag == tag)
        .unwrap_or(&FORMATS[0])
}

/// Create the schema adapter for a detected format
pub fn create_adapter(tag: FormatTag) -> Box<dyn FormatAdapter> {
    match tag {
        FormatTag::TurnPairs => Box::new(TurnPairAdapter),
        FormatTag::RichConversation => Box::new(RichConversationAdapter),
        FormatTag::RichExport => Box::new(RichExportAdapter),
    }
}

/// Guess the platform from a source file name (case-insensitive substring match)
pub fn platform_from_file_name(file_name: &str) -> Option<&'static str> {
    let lower = file_name.to_lowercase();
    PLATFORM_HINTS
        .iter()
        .find(|(fragment, _)| lower.contains(fragment))
        .map(|(_, platform)| *platform)
}

/// Platform name used for labels: explicit value, then file-name hint, then format default
pub fn resolve_platform(explicit: Option<&str>, file_name: &str, tag: FormatTag) -> String {
    explicit
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .or_else(|| platform_from_file_name(file_name).map(str::to_string))
        .unwrap_or_else(|| get_format_metadata(tag).default_platform.to_string())
}

/// Title fallback derived from the file name
pub fn title_from_file_name(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
