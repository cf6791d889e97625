use redraft_core::{CanonicalRow, FieldValue, Record};
use tracing::debug;

use crate::precedence::row_to_record;
use crate::spec::CollectionSpec;

/// Fill gaps in a draft-sourced collection from the canonical rows.
///
/// Only records with at least one enrichable field blank are touched.
/// Correlation is on the business key, case-insensitive and trimmed; the
/// first matching candidate wins. Writes go through `guarded_set`, so
/// existing user input is never replaced and a canonical numeric zero in
/// particular cannot clobber a textual entry.
pub fn enrich_records(records: &mut [Record], canonical: &[CanonicalRow], spec: &CollectionSpec) {
    if spec.enrichable.is_empty() || spec.business_key.is_empty() || canonical.is_empty() {
        return;
    }
    if !records.iter().any(|r| needs_enrichment(r, spec)) {
        return;
    }

    let candidates: Vec<Record> = canonical
        .iter()
        .map(|row| row_to_record(row, spec))
        .collect();

    for record in records.iter_mut() {
        if !needs_enrichment(record, spec) {
            continue;
        }
        let Some(candidate) = candidates
            .iter()
            .find(|c| business_key_matches(record, c, spec.business_key))
        else {
            // No candidate: absence is preserved, not defaulted
            continue;
        };
        for field in spec.enrichable {
            guarded_set(record, field, candidate.get(field));
        }
    }
}

fn needs_enrichment(record: &Record, spec: &CollectionSpec) -> bool {
    spec.enrichable.iter().any(|f| record.is_field_blank(f))
}

fn business_key_matches(record: &Record, candidate: &Record, key_fields: &[&str]) -> bool {
    key_fields.iter().all(|field| {
        match (record.field_str(field), candidate.field_str(field)) {
            (Some(a), Some(b)) => a.trim().eq_ignore_ascii_case(b.trim()),
            _ => false,
        }
    })
}

/// Write `incoming` into `record.field` unless it would lose data: existing
/// meaningful values stay, and the numeric-zero guard logs when it fires so
/// the dropped value is visible in diagnostics.
fn guarded_set(record: &mut Record, field: &str, incoming: &FieldValue) {
    let existing = record.get(field);
    if existing.is_meaningful() {
        if !FieldValue::overwrite_allowed(existing, incoming) {
            debug!(field, "zero-valued candidate blocked by overwrite guard");
        }
        return;
    }
    if incoming.is_meaningful() {
        record.set(field, incoming.clone());
    }
}
