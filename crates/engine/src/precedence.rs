use redraft_core::{CanonicalRow, FieldValue, Provenance, Record};
use redraft_extract::extract;

use crate::spec::CollectionSpec;

/// Outcome of source precedence for one collection.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceDecision {
    UseDraft(Vec<Record>),
    UseCanonical(Vec<Record>),
    ExplicitEmpty,
}

impl SourceDecision {
    pub fn provenance(&self) -> Provenance {
        match self {
            Self::UseDraft(_) => Provenance::Draft,
            Self::UseCanonical(_) => Provenance::Canonical,
            Self::ExplicitEmpty => Provenance::ExplicitEmpty,
        }
    }
}

/// Decode one canonical row into a record: mapped columns first, then the
/// fields extracted from the characteristics string. An extracted field wins
/// over a column of the same name since it is the more specific encoding.
pub fn row_to_record(row: &CanonicalRow, spec: &CollectionSpec) -> Record {
    let mut record = Record::new();
    for (column, field) in spec.column_map {
        if let Some(value) = row.column(column) {
            record.set(*field, FieldValue::Text(value.to_string()));
        }
    }
    for (field, value) in extract(&row.characteristics, &spec.rules) {
        record.set(field, FieldValue::Text(value));
    }
    record
}

/// Choose the authoritative source for one collection.
///
/// The order is load-bearing: a present-but-empty draft key means the user
/// deliberately cleared the collection, and canonical rows must not
/// resurrect it. That check has to come before any canonical fallback.
pub fn resolve_source(
    draft: Option<&[Record]>,
    canonical: &[CanonicalRow],
    spec: &CollectionSpec,
) -> SourceDecision {
    match draft {
        Some(records) if !records.is_empty() => SourceDecision::UseDraft(records.to_vec()),
        Some(_) => SourceDecision::ExplicitEmpty,
        None if !canonical.is_empty() => SourceDecision::UseCanonical(
            canonical
                .iter()
                .map(|row| row_to_record(row, spec))
                .collect(),
        ),
        None => SourceDecision::ExplicitEmpty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::spec_for;
    use redraft_core::EntityType;

    fn breaker_row() -> CanonicalRow {
        CanonicalRow::new("Scope: PV Board | Rated: 630")
            .with_column("brand", "Acme")
            .with_column("model", "X1")
    }

    #[test]
    fn explicit_empty_beats_canonical() {
        let spec = spec_for(EntityType::ProtectionBreakers);
        let decision = resolve_source(Some(&[]), &[breaker_row()], spec);
        assert_eq!(decision, SourceDecision::ExplicitEmpty);
    }

    #[test]
    fn missing_draft_falls_back_to_canonical() {
        let spec = spec_for(EntityType::ProtectionBreakers);
        let decision = resolve_source(None, &[breaker_row()], spec);
        let SourceDecision::UseCanonical(records) = decision else {
            panic!("expected UseCanonical");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field_str("brand_name"), Some("Acme"));
        assert_eq!(records[0].field_str("scope_text"), Some("PV Board"));
        assert_eq!(records[0].field_str("rated_current"), Some("630"));
    }

    #[test]
    fn nothing_anywhere_is_explicit_empty() {
        let spec = spec_for(EntityType::ProtectionBreakers);
        assert_eq!(resolve_source(None, &[], spec), SourceDecision::ExplicitEmpty);
    }

    #[test]
    fn non_empty_draft_wins() {
        let spec = spec_for(EntityType::ProtectionBreakers);
        let mut record = Record::new();
        record.set("brand_name", FieldValue::Text("Beta".into()));
        let decision = resolve_source(Some(&[record.clone()]), &[breaker_row()], spec);
        assert_eq!(decision, SourceDecision::UseDraft(vec![record]));
    }
}
