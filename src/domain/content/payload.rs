//! Opaque content payloads and the shallow overlay used to merge variants.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::ValidationError;

/// A type-erased JSON object holding the content of a unit or variant.
///
/// The resolver never inspects payload shape; per-type validation belongs to
/// whoever renders the content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentPayload(Map<String, Value>);

impl ContentPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ValidationError::invalid_format(
                "content",
                format!("expected a JSON object, got {}", json_kind(&other)),
            )),
        }
    }

    /// Builder-style field setter, used mostly by tests and seeds.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a string field, or `None` if missing or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shallow merge: every top-level key of `overlay` replaces the same key
    /// here; keys only present here are kept. Nested objects are replaced
    /// wholesale, not merged.
    pub fn overlay(&self, overlay: &ContentPayload) -> ContentPayload {
        let mut merged = self.0.clone();
        for (key, value) in &overlay.0 {
            merged.insert(key.clone(), value.clone());
        }
        ContentPayload(merged)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for ContentPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn json_kind(value: &Value) -> &'static str {
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

    fn payload(value: Value) -> ContentPayload {
        ContentPayload::from_value(value).unwrap()
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(ContentPayload::from_value(json!("text")).is_err());
        assert!(ContentPayload::from_value(json!([1, 2])).is_err());
        assert!(ContentPayload::from_value(json!(null)).is_err());
    }

    #[test]
    fn overlay_replaces_shared_keys_and_keeps_default_only_keys() {
        let base = payload(json!({"text": "A", "hint": "keep"}));
        let variant = payload(json!({"text": "B"}));

        let merged = base.overlay(&variant);
        assert_eq!(merged.into_value(), json!({"text": "B", "hint": "keep"}));
    }

    #[test]
    fn overlay_adds_variant_only_keys() {
        let base = payload(json!({"questionText": "Q"}));
        let variant = payload(json!({"hint": "x"}));

        let merged = base.overlay(&variant);
        assert_eq!(merged.get_str("questionText"), Some("Q"));
        assert_eq!(merged.get_str("hint"), Some("x"));
    }

    #[test]
    fn overlay_is_shallow() {
        let base = payload(json!({"meta": {"a": 1, "b": 2}}));
        let variant = payload(json!({"meta": {"a": 9}}));

        let merged = base.overlay(&variant);
        assert_eq!(merged.get("meta"), Some(&json!({"a": 9})));
    }

    #[test]
    fn overlay_with_explicit_null_overrides() {
        let base = payload(json!({"hint": "x"}));
        let variant = payload(json!({"hint": null}));

        assert_eq!(base.overlay(&variant).get("hint"), Some(&Value::Null));
    }

    #[test]
    fn get_str_ignores_non_strings() {
        let p = ContentPayload::new().with("type", 3);
        assert_eq!(p.get_str("type"), None);
    }
}
