use serde::{Deserialize, Serialize};

/// A loosely-typed scalar as it appears in a draft record. Autosaved drafts
/// carry numerics as strings more often than not; values stay `Text` until a
/// consumer interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Missing,
    Text(String),
    Number(f64),
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Missing, Self::Missing) => true,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b).is_eq(),
            _ => false,
        }
    }
}

impl FieldValue {
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Missing,
            serde_json::Value::String(s) => FieldValue::Text(s.clone()),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => FieldValue::Number(f),
                None => FieldValue::Missing,
            },
            serde_json::Value::Bool(b) => FieldValue::Text(b.to_string()),
            // Nested structures are not scalars; treat as absent
            _ => FieldValue::Missing,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Missing => serde_json::Value::Null,
            FieldValue::Text(s) => serde_json::Value::String(s.clone()),
            FieldValue::Number(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// True for anything a user would read as "filled in": present, and not
    /// blank text.
    pub fn is_meaningful(&self) -> bool {
        match self {
            FieldValue::Missing => false,
            FieldValue::Text(s) => !s.trim().is_empty(),
            FieldValue::Number(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret the value as a number. Textual values are trimmed and have
    /// decimal commas normalized before parsing.
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            FieldValue::Number(f) => Some(*f),
            FieldValue::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
            FieldValue::Missing => None,
        }
    }

    pub fn is_numeric_zero(&self) -> bool {
        matches!(self.numeric_value(), Some(f) if f == 0.0)
    }

    pub fn to_display_string(&self) -> String {
        match self {
            FieldValue::Missing => String::new(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(f) => {
                if f.fract() == 0.0 && f.is_finite() && f.abs() < 1e15 {
                    format!("{}", *f as i64)
                } else {
                    format!("{f}")
                }
            }
        }
    }

    /// Guard for merge/accumulation writes: an incoming numeric zero may not
    /// replace a non-empty value that does not itself read as a number. A zero
    /// arriving against a textual entry is far more likely a coercion artifact
    /// of the source store than a genuine measurement.
    pub fn overwrite_allowed(existing: &FieldValue, incoming: &FieldValue) -> bool {
        if incoming.is_numeric_zero()
            && existing.is_meaningful()
            && existing.numeric_value().is_none()
        {
            return false;
        }
        true
    }
}
