use serde_json::Value;

use redraft_core::{CanonicalRecordSet, CanonicalRow, EntityType, ReportId};
use redraft_engine::ReconcileContext;

/// Fixture builder: assemble a draft document and canonical rows, get a
/// ready reconcile context.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    draft: Option<serde_json::Map<String, Value>>,
    canonical: CanonicalRecordSet,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one collection to the draft document. Passing an empty array is
    /// how a test expresses "the user cleared this collection".
    pub fn draft_collection(mut self, key: &str, records: Value) -> Self {
        self.draft
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.to_string(), records);
        self
    }

    pub fn canonical_row(mut self, entity_type: EntityType, row: CanonicalRow) -> Self {
        self.canonical.push(entity_type, row);
        self
    }

    pub fn build(self) -> ReconcileContext {
        let draft_json = self.draft.map(|m| Value::Object(m).to_string());
        ReconcileContext::from_draft_json(ReportId::new(), draft_json.as_deref(), self.canonical)
    }

    /// Bypass the draft assembled so far and hand the context a raw string,
    /// for decode-failure paths.
    pub fn build_with_raw_draft(self, raw: &str) -> ReconcileContext {
        ReconcileContext::from_draft_json(ReportId::new(), Some(raw), self.canonical)
    }
}
