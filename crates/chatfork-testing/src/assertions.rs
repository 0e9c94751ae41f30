//! Assertions over the CLI's JSON output.

use anyhow::{Context, Result};
use serde_json::Value;

/// Uuids listed under `messages` in `view`/`export` output.
pub fn message_uuids(json: &Value) -> Result<Vec<String>> {
    let messages = json["messages"]
        .as_array()
        .context("Expected 'messages' array in JSON")?;

    messages
        .iter()
        .enumerate()
        .map(|(i, m)| {
            m["uuid"]
                .as_str()
                .map(str::to_string)
                .with_context(|| format!("Message {} missing uuid", i))
        })
        .collect()
}

/// Assert the visible messages in the output, in order.
pub fn assert_message_uuids(json: &Value, expected: &[&str]) -> Result<()> {
    let actual = message_uuids(json)?;
    if actual != expected {
        anyhow::bail!("Expected messages {:?}, got {:?}", expected, actual);
    }
    Ok(())
}

/// Assert the number of entries under `forks` in `forks` output.
pub fn assert_fork_count(json: &Value, expected: usize) -> Result<()> {
    let forks = json["forks"]
        .as_array()
        .context("Expected 'forks' array in JSON")?;

    if forks.len() != expected {
        anyhow::bail!("Expected {} forks, got {}", expected, forks.len());
    }
    Ok(())
}
