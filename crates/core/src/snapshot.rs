use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::entity::EntityType;
use crate::error::CoreError;
use crate::record::Record;

/// The latest autosaved, user-authored state of the form: one JSON document
/// keyed by entity type. The engine only ever reads it.
///
/// A key that is absent and a key holding an empty array mean different
/// things (never autosaved vs. deliberately cleared), so `collection`
/// returns `Option<&[Record]>` rather than flattening to an empty slice.
#[derive(Debug, Clone, Default)]
pub struct DraftSnapshot {
    collections: BTreeMap<EntityType, Vec<Record>>,
}

impl DraftSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse an autosave document. The root must be a JSON object; a
    /// malformed value under a single known key drops only that key, the
    /// rest of the snapshot survives.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| CoreError::DraftDecode(e.to_string()))?;
        let root = value.as_object().ok_or(CoreError::DraftNotObject)?;

        let mut collections = BTreeMap::new();
        for (key, entry) in root {
            let Some(entity_type) = EntityType::from_key(key) else {
                // Other form sections share the document; not ours to decode
                debug!(%key, "skipping snapshot key outside engine scope");
                continue;
            };
            let Some(items) = entry.as_array() else {
                warn!(%key, "snapshot value is not an array, dropping key");
                continue;
            };
            let mut records = Vec::with_capacity(items.len());
            for item in items {
                match item.as_object() {
                    Some(object) => records.push(Record::from_json_object(object)),
                    None => warn!(%key, "skipping non-object entry in snapshot array"),
                }
            }
            collections.insert(entity_type, records);
        }

        Ok(Self { collections })
    }

    /// `None` = the snapshot never contained this collection;
    /// `Some(&[])` = the user cleared it.
    pub fn collection(&self, entity_type: EntityType) -> Option<&[Record]> {
        self.collections.get(&entity_type).map(|v| v.as_slice())
    }

    pub fn insert(&mut self, entity_type: EntityType, records: Vec<Record>) {
        self.collections.insert(entity_type, records);
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
