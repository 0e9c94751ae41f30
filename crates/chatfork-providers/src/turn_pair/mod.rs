pub(crate) mod normalize;
pub(crate) mod schema;

use chatfork_types::{FormatTag, NormalizedDocument};
use serde_json::Value;

use crate::Result;

/// Adapter for `[{human, assistant}]` exports
pub struct TurnPairAdapter;

impl crate::traits::FormatAdapter for TurnPairAdapter {
    fn tag(&self) -> FormatTag {
        FormatTag::TurnPairs
    }

    fn normalize(&self, json: &Value, file_name: &str) -> Result<NormalizedDocument> {
        normalize::normalize_turn_pairs(json, file_name)
    }
}
