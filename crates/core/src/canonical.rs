use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityType;

/// One previously-submitted equipment row: a fixed set of scalar columns
/// plus the opaque characteristics text (`"Label: value | Label2: value2"`)
/// carrying whatever extra fields the submitting form knew about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRow {
    pub columns: BTreeMap<String, String>,
    pub characteristics: String,
}

impl CanonicalRow {
    pub fn new(characteristics: impl Into<String>) -> Self {
        Self {
            columns: BTreeMap::new(),
            characteristics: characteristics.into(),
        }
    }

    pub fn with_column(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.columns.insert(name.into(), value.into());
        self
    }

    pub fn column(&self, name: &str) -> Option<&str> {
        self.columns.get(name).map(|s| s.as_str())
    }
}

/// The persisted rows of a report, ordered per entity type. Append-only from
/// the engine's point of view; nothing here is ever written back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanonicalRecordSet {
    rows: BTreeMap<EntityType, Vec<CanonicalRow>>,
}

impl CanonicalRecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self, entity_type: EntityType) -> &[CanonicalRow] {
        self.rows.get(&entity_type).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn push(&mut self, entity_type: EntityType, row: CanonicalRow) {
        self.rows.entry(entity_type).or_default().push(row);
    }

    pub fn set_rows(&mut self, entity_type: EntityType, rows: Vec<CanonicalRow>) {
        self.rows.insert(entity_type, rows);
    }
}
