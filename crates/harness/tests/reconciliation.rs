use serde_json::json;

use redraft_core::{CanonicalRow, EntityType, Provenance};
use redraft_harness::ReportBuilder;

fn breaker_row(brand: &str, model: &str, characteristics: &str) -> CanonicalRow {
    CanonicalRow::new(characteristics)
        .with_column("brand", brand)
        .with_column("model", model)
}

// ============================================================================
// Source precedence
// ============================================================================

#[test]
fn scenario_explicit_empty_is_not_resurrected() {
    // The user deleted every breaker; three canonical rows still exist
    let context = ReportBuilder::new()
        .draft_collection("protection_breakers", json!([]))
        .canonical_row(EntityType::ProtectionBreakers, breaker_row("A", "1", "Rated: 10"))
        .canonical_row(EntityType::ProtectionBreakers, breaker_row("B", "2", "Rated: 20"))
        .canonical_row(EntityType::ProtectionBreakers, breaker_row("C", "3", "Rated: 30"))
        .build();

    let collection = context.reconcile(EntityType::ProtectionBreakers);
    assert_eq!(collection.provenance, Provenance::ExplicitEmpty);
    assert!(collection.records.is_empty());
    // The output array is present even when empty
    assert_eq!(collection.to_json(), json!([]));
}

#[test]
fn explicit_empty_wins_for_every_entity_type() {
    for entity_type in EntityType::ALL {
        let context = ReportBuilder::new()
            .draft_collection(entity_type.as_key(), json!([]))
            .canonical_row(entity_type, CanonicalRow::new("Serial: 99"))
            .build();

        let collection = context.reconcile(entity_type);
        assert_eq!(
            collection.provenance,
            Provenance::ExplicitEmpty,
            "{entity_type} resurrected a cleared collection"
        );
        assert!(collection.records.is_empty());
    }
}

#[test]
fn non_empty_draft_wins_and_preserves_order() {
    let context = ReportBuilder::new()
        .draft_collection(
            "protection_breakers",
            json!([
                {"brand_name": "Zeta", "model_name": "Z9", "rated_current": "125"},
                {"brand_name": "Acme", "model_name": "X1", "rated_current": "630"},
            ]),
        )
        .canonical_row(EntityType::ProtectionBreakers, breaker_row("Other", "O", "Rated: 1"))
        .build();

    let collection = context.reconcile(EntityType::ProtectionBreakers);
    assert_eq!(collection.provenance, Provenance::Draft);
    assert_eq!(collection.records.len(), 2);
    // Draft order, never interleaved with canonical rows
    assert_eq!(collection.records[0].field_str("brand_name"), Some("Zeta"));
    assert_eq!(collection.records[1].field_str("brand_name"), Some("Acme"));
}

#[test]
fn missing_draft_key_falls_back_to_canonical() {
    let context = ReportBuilder::new()
        .canonical_row(
            EntityType::ProtectionBreakers,
            breaker_row("Acme", "X1", "Scope: PV Board | Rated: 630"),
        )
        .build();

    let collection = context.reconcile(EntityType::ProtectionBreakers);
    assert_eq!(collection.provenance, Provenance::Canonical);
    assert_eq!(collection.records.len(), 1);
    assert_eq!(collection.records[0].field_str("scope_text"), Some("PV Board"));
    assert_eq!(collection.records[0].field_str("rated_current"), Some("630"));
}

#[test]
fn nothing_anywhere_yields_empty_collection() {
    let context = ReportBuilder::new().build();
    let collection = context.reconcile(EntityType::SmartMeters);
    assert_eq!(collection.provenance, Provenance::ExplicitEmpty);
    assert!(collection.records.is_empty());
}

// ============================================================================
// Enrichment
// ============================================================================

#[test]
fn scenario_blank_rated_current_enriched_from_canonical() {
    let context = ReportBuilder::new()
        .draft_collection(
            "protection_breakers",
            json!([{"brand_name": "Acme", "model_name": "X1", "rated_current": ""}]),
        )
        .canonical_row(EntityType::ProtectionBreakers, breaker_row("Acme", "X1", "Rated: 40"))
        .build();

    let collection = context.reconcile(EntityType::ProtectionBreakers);
    assert_eq!(collection.provenance, Provenance::Draft);
    assert_eq!(collection.records[0].field_str("rated_current"), Some("40"));
}

#[test]
fn zero_candidate_does_not_overwrite_textual_entry() {
    // The record qualifies for enrichment through its blank breaking
    // capacity; the canonical zero must not clobber the textual note
    let context = ReportBuilder::new()
        .draft_collection(
            "protection_breakers",
            json!([{
                "brand_name": "Acme",
                "model_name": "X1",
                "rated_current": "awaiting retest",
                "breaking_capacity": ""
            }]),
        )
        .canonical_row(
            EntityType::ProtectionBreakers,
            breaker_row("Acme", "X1", "Rated: 0 | Icu: 36"),
        )
        .build();

    let collection = context.reconcile(EntityType::ProtectionBreakers);
    let record = &collection.records[0];
    assert_eq!(record.field_str("rated_current"), Some("awaiting retest"));
    assert_eq!(record.field_str("breaking_capacity"), Some("36"));
}

#[test]
fn unmatched_draft_record_keeps_its_gaps() {
    let context = ReportBuilder::new()
        .draft_collection(
            "protection_breakers",
            json!([{"brand_name": "Nobody", "model_name": "N0", "rated_current": ""}]),
        )
        .canonical_row(EntityType::ProtectionBreakers, breaker_row("Acme", "X1", "Rated: 40"))
        .build();

    let collection = context.reconcile(EntityType::ProtectionBreakers);
    let record = &collection.records[0];
    assert_eq!(record.field_str("rated_current"), Some(""));
}

// ============================================================================
// Decode failures and determinism
// ============================================================================

#[test]
fn unreadable_draft_downgrades_to_canonical() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let context = ReportBuilder::new()
        .canonical_row(EntityType::ProtectionBreakers, breaker_row("Acme", "X1", "Rated: 40"))
        .build_with_raw_draft("### not json ###");

    let collection = context.reconcile(EntityType::ProtectionBreakers);
    assert_eq!(collection.provenance, Provenance::Canonical);
    assert_eq!(collection.records.len(), 1);
}

#[test]
fn reconciliation_is_deterministic_across_contexts() {
    let build = || {
        ReportBuilder::new()
            .draft_collection(
                "smart_meters",
                json!([{"brand_name": "MeterCo", "model_name": "M3", "serial_number": "S-77"}]),
            )
            .canonical_row(
                EntityType::SmartMeters,
                CanonicalRow::new("Serial: S-00 | Ratio: 100/5")
                    .with_column("brand", "MeterCo")
                    .with_column("model", "M3"),
            )
            .build()
    };

    let a = build().reconcile(EntityType::SmartMeters);
    let b = build().reconcile(EntityType::SmartMeters);
    assert_eq!(a.records, b.records);
    assert_eq!(a.provenance, b.provenance);
}

#[test]
fn collections_reconcile_independently() {
    // An explicit clear of one collection must not leak into a sibling
    let context = ReportBuilder::new()
        .draft_collection("protection_breakers", json!([]))
        .canonical_row(EntityType::ProtectionBreakers, breaker_row("A", "1", "Rated: 10"))
        .canonical_row(
            EntityType::ProtectionCables,
            CanonicalRow::new("Section: 4").with_column("brand", "CableCo"),
        )
        .build();

    assert!(context.reconcile(EntityType::ProtectionBreakers).records.is_empty());
    let cables = context.reconcile(EntityType::ProtectionCables);
    assert_eq!(cables.provenance, Provenance::Canonical);
    assert_eq!(cables.records.len(), 1);
}

#[test]
fn summary_reports_every_collection() {
    let context = ReportBuilder::new()
        .draft_collection("punch_list_items", json!([{"description": "loose gland"}]))
        .canonical_row(EntityType::EnergyMeters, CanonicalRow::new("Serial: E-1"))
        .build();

    let summary = context.summary();
    assert_eq!(summary.collections.len(), EntityType::ALL.len());

    let punch = summary
        .collections
        .iter()
        .find(|c| c.entity_type == EntityType::PunchListItems)
        .unwrap();
    assert_eq!(punch.provenance, Provenance::Draft);
    assert_eq!(punch.record_count, 1);

    let energy = summary
        .collections
        .iter()
        .find(|c| c.entity_type == EntityType::EnergyMeters)
        .unwrap();
    assert_eq!(energy.provenance, Provenance::Canonical);
    assert_eq!(energy.record_count, 1);
}
