use serde::Serialize;
use tracing::{debug, warn};

use redraft_core::{
    CanonicalRecordSet, DraftSnapshot, EntityType, Provenance, Record, ReportId,
};

use crate::enrich::enrich_records;
use crate::precedence::{resolve_source, SourceDecision};
use crate::spec::spec_for;

/// Final result for one collection: fully-typed records in source order,
/// tagged with where they came from. Serializes to a JSON array that is
/// always present, even when empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledCollection {
    pub entity_type: EntityType,
    pub records: Vec<Record>,
    pub provenance: Provenance,
}

impl ReconciledCollection {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.records.iter().map(Record::to_json).collect())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionSummary {
    pub entity_type: EntityType,
    pub provenance: Provenance,
    pub record_count: usize,
}

/// Per-type provenance and counts for one report-open, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileSummary {
    pub report_id: ReportId,
    pub collections: Vec<CollectionSummary>,
}

/// Reconciliation state for one "report opened for edit" event. A new
/// context is built per open and discarded on navigation away; nothing is
/// shared across opens. Reconciliation itself is a pure function of the two
/// input documents: same inputs, same output, same provenance.
pub struct ReconcileContext {
    report_id: ReportId,
    draft: DraftSnapshot,
    canonical: CanonicalRecordSet,
}

impl ReconcileContext {
    pub fn new(report_id: ReportId, draft: DraftSnapshot, canonical: CanonicalRecordSet) -> Self {
        Self {
            report_id,
            draft,
            canonical,
        }
    }

    /// Build a context from the raw autosave document. A draft that fails to
    /// decode downgrades to an empty snapshot instead of failing the report
    /// open; every collection then falls through to canonical or
    /// explicit-empty.
    pub fn from_draft_json(
        report_id: ReportId,
        draft_json: Option<&str>,
        canonical: CanonicalRecordSet,
    ) -> Self {
        let draft = match draft_json {
            Some(json) => match DraftSnapshot::from_json(json) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    warn!(%report_id, %err, "draft snapshot unreadable, using canonical only");
                    DraftSnapshot::empty()
                }
            },
            None => DraftSnapshot::empty(),
        };
        Self::new(report_id, draft, canonical)
    }

    pub fn report_id(&self) -> ReportId {
        self.report_id
    }

    /// Reconcile one collection: precedence, then gap enrichment for
    /// draft-sourced records.
    pub fn reconcile(&self, entity_type: EntityType) -> ReconciledCollection {
        let spec = spec_for(entity_type);
        let canonical_rows = self.canonical.rows(entity_type);
        let decision = resolve_source(self.draft.collection(entity_type), canonical_rows, spec);
        let provenance = decision.provenance();

        let records = match decision {
            SourceDecision::UseDraft(mut records) => {
                enrich_records(&mut records, canonical_rows, spec);
                records
            }
            SourceDecision::UseCanonical(records) => records,
            SourceDecision::ExplicitEmpty => Vec::new(),
        };

        debug!(
            report_id = %self.report_id,
            %entity_type,
            provenance = provenance.as_str(),
            count = records.len(),
            "collection reconciled"
        );

        ReconciledCollection {
            entity_type,
            records,
            provenance,
        }
    }

    /// Every collection, in declaration order. Collections never share state,
    /// so order only affects logging.
    pub fn reconcile_all(&self) -> Vec<ReconciledCollection> {
        EntityType::ALL.iter().map(|t| self.reconcile(*t)).collect()
    }

    pub fn summary(&self) -> ReconcileSummary {
        ReconcileSummary {
            report_id: self.report_id,
            collections: self
                .reconcile_all()
                .iter()
                .map(|c| CollectionSummary {
                    entity_type: c.entity_type,
                    provenance: c.provenance,
                    record_count: c.records.len(),
                })
                .collect(),
        }
    }

    /// The reconciled reference list used for positional index resolution.
    pub fn reference_units(&self) -> Vec<Record> {
        self.reconcile(EntityType::Inverters).records
    }
}
