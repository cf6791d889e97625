use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field_value::FieldValue;

/// One loosely-typed record of a collection: field name → scalar value.
/// Field addressing is by string key throughout the engine; per-type
/// knowledge (business keys, enrichable fields) lives in the collection
/// specs, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> &FieldValue {
        self.fields.get(field).unwrap_or(&FieldValue::Missing)
    }

    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn field_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_text())
    }

    /// Missing, or present but blank text.
    pub fn is_field_blank(&self, field: &str) -> bool {
        !self.get(field).is_meaningful()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn from_json_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut record = Record::new();
        for (key, value) in object {
            let field = FieldValue::from_json(value);
            if !field.is_missing() {
                record.set(key.clone(), field);
            }
        }
        record
    }

    /// JSON object form; `Missing` fields are never stored so every entry
    /// serializes.
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for (key, value) in &self.fields {
            object.insert(key.clone(), value.to_json());
        }
        serde_json::Value::Object(object)
    }
}
