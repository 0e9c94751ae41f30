use chatfork_types::Degradation;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

/// Collects per-field extraction problems while a document is being normalized
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    degradations: Vec<Degradation>,
}

impl Diagnostics {
    pub fn degrade(&mut self, message_index: Option<usize>, field: &str, detail: impl Into<String>) {
        let degradation = Degradation {
            message_index,
            field: field.to_string(),
            detail: detail.into(),
        };
        warn!(
            message_index = ?degradation.message_index,
            field = %degradation.field,
            "field extraction degraded: {}",
            degradation.detail
        );
        self.degradations.push(degradation);
    }

    pub fn into_inner(self) -> Vec<Degradation> {
        self.degradations
    }
}

/// Lenient accessor over one source object.
///
/// Wrong-typed or missing required fields fall back to empty values and are recorded
/// as degradations instead of failing the surrounding message.
pub(crate) struct FieldReader<'a, 'd> {
    obj: &'a Map<String, Value>,
    index: Option<usize>,
    diag: &'d mut Diagnostics,
}

impl<'a, 'd> FieldReader<'a, 'd> {
    pub fn new(obj: &'a Map<String, Value>, index: Option<usize>, diag: &'d mut Diagnostics) -> Self {
        Self { obj, index, diag }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.obj.get(key).filter(|v| !v.is_null())
    }

    /// First present, non-null value among `keys`, with the key that matched
    fn first(&self, keys: &[&'static str]) -> Option<(&'static str, &'a Value)> {
        keys.iter().find_map(|key| self.get(key).map(|v| (*key, v)))
    }

    /// Optional string field; numbers are stringified, other types degrade to `None`
    pub fn opt_str(&mut self, keys: &[&'static str]) -> Option<String> {
        let (key, value) = self.first(keys)?;
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            other => {
                self.degrade(key, format!("expected string, found {}", type_name(other)));
                None
            }
        }
    }

    /// Required string field; missing or wrong-typed values degrade to an empty string
    pub fn req_str(&mut self, keys: &[&'static str]) -> String {
        if self.first(keys).is_none() {
            self.degrade(keys[0], "missing required field");
            return String::new();
        }
        self.opt_str(keys).unwrap_or_default()
    }

    /// Array field; absent means empty, non-array degrades to empty
    pub fn list(&mut self, key: &'static str) -> &'a [Value] {
        match self.get(key) {
            None => &[],
            Some(Value::Array(items)) => items,
            Some(other) => {
                let found = type_name(other);
                self.degrade(key, format!("expected array, found {}", found));
                &[]
            }
        }
    }

    /// Deserialize one value into a typed schema item, degrading on mismatch
    pub fn typed<T: DeserializeOwned>(&mut self, field: &str, value: &Value) -> Option<T> {
        match serde_json::from_value::<T>(value.clone()) {
            Ok(item) => Some(item),
            Err(err) => {
                self.degrade(field, err.to_string());
                None
            }
        }
    }

    pub fn degrade(&mut self, field: &str, detail: impl Into<String>) {
        self.diag.degrade(self.index, field, detail);
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_req_str_missing_degrades_to_empty() {
        let obj = object(json!({"other": 1}));
        let mut diag = Diagnostics::default();
        let mut reader = FieldReader::new(&obj, Some(4), &mut diag);

        assert_eq!(reader.req_str(&["uuid"]), "");
        let degradations = diag.into_inner();
        assert_eq!(degradations.len(), 1);
        assert_eq!(degradations[0].message_index, Some(4));
        assert_eq!(degradations[0].field, "uuid");
    }

    #[test]
    fn test_opt_str_uses_aliases_in_order() {
        let obj = object(json!({"parentUuid": "p1", "created_at": 1700000000}));
        let mut diag = Diagnostics::default();
        let mut reader = FieldReader::new(&obj, None, &mut diag);

        assert_eq!(
            reader.opt_str(&["parent_message_uuid", "parentUuid"]),
            Some("p1".to_string())
        );
        assert_eq!(reader.opt_str(&["created_at"]), Some("1700000000".to_string()));
        assert!(diag.into_inner().is_empty());
    }

    #[test]
    fn test_list_wrong_type_degrades() {
        let obj = object(json!({"content": "not a list", "files": null}));
        let mut diag = Diagnostics::default();
        let mut reader = FieldReader::new(&obj, Some(0), &mut diag);

        assert!(reader.list("content").is_empty());
        assert!(reader.list("files").is_empty());
        assert_eq!(diag.into_inner().len(), 1);
    }
}
