use std::collections::HashSet;

use chatfork_types::{CanonicalMessage, ExportOptions};

/// Copy of `message` with every field the options exclude emptied
pub fn project(message: &CanonicalMessage, options: &ExportOptions) -> CanonicalMessage {
    let mut projected = message.clone();
    if !options.include_thinking {
        projected.thinking.clear();
    }
    if !options.include_artifacts {
        projected.artifacts.clear();
    }
    if !options.include_tools {
        projected.tools.clear();
    }
    if !options.include_citations {
        projected.citations.clear();
    }
    if !options.include_timestamps {
        projected.timestamp.clear();
    }
    projected
}

/// Messages to export, in input order.
///
/// With `export_marked_only`, only messages whose `index` is in `marked` survive.
pub fn select<'a, I>(
    messages: I,
    options: &ExportOptions,
    marked: &HashSet<usize>,
) -> Vec<CanonicalMessage>
where
    I: IntoIterator<Item = &'a CanonicalMessage>,
{
    messages
        .into_iter()
        .filter(|m| !options.export_marked_only || marked.contains(&m.index))
        .map(|m| project(m, options))
        .collect()
}
