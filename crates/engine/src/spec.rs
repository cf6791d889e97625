use std::collections::BTreeMap;
use std::sync::LazyLock;

use redraft_core::EntityType;
use redraft_extract::{rules, RuleSet};

/// How a reconciled collection maps onto the UI's flat key addressing.
#[derive(Debug, Clone)]
pub enum ProjectionScheme {
    /// One key per record index: `{prefix}_{field}_{index}`.
    Flat {
        prefix: &'static str,
        fields: &'static [&'static str],
    },
    /// One key per (unit, channel, sub-channel) triple:
    /// `{prefix}_{field}_{unit}_{channel}_{subchannel}`. The unit index is
    /// resolved through the fallback chain in `projection`.
    Positional {
        prefix: &'static str,
        index_field: &'static str,
        ref_id_field: &'static str,
        channel_field: &'static str,
        subchannel_field: &'static str,
        value_fields: &'static [&'static str],
    },
}

/// Everything the engine knows about one collection, declared in one place:
/// where it lives in the snapshot, how its canonical rows decode, how draft
/// and canonical records correlate, and how it projects onto the UI.
pub struct CollectionSpec {
    pub entity_type: EntityType,
    pub rules: RuleSet,
    /// Canonical column name → record field name.
    pub column_map: &'static [(&'static str, &'static str)],
    /// Fields forming the business key for enrichment matching.
    pub business_key: &'static [&'static str],
    /// Fields the merger may fill from a matched canonical row.
    pub enrichable: &'static [&'static str],
    pub projection: ProjectionScheme,
}

const BRAND_MODEL_COLUMNS: &[(&str, &str)] =
    &[("brand", "brand_name"), ("model", "model_name")];
const BRAND_MODEL_KEY: &[&str] = &["brand_name", "model_name"];

static REGISTRY: LazyLock<BTreeMap<EntityType, CollectionSpec>> = LazyLock::new(build_registry);

pub fn spec_for(entity_type: EntityType) -> &'static CollectionSpec {
    REGISTRY
        .get(&entity_type)
        .expect("registry covers every entity type")
}

fn build_registry() -> BTreeMap<EntityType, CollectionSpec> {
    let specs = vec![
        CollectionSpec {
            entity_type: EntityType::Inverters,
            rules: rules::inverter_rules(),
            column_map: BRAND_MODEL_COLUMNS,
            business_key: BRAND_MODEL_KEY,
            enrichable: &["rated_power_kw"],
            projection: ProjectionScheme::Flat {
                prefix: "inverter",
                fields: &[
                    "brand_name",
                    "model_name",
                    "serial_number",
                    "inverter_id",
                    "rated_power_kw",
                ],
            },
        },
        CollectionSpec {
            entity_type: EntityType::ProtectionBreakers,
            rules: rules::breaker_rules(),
            column_map: BRAND_MODEL_COLUMNS,
            business_key: BRAND_MODEL_KEY,
            enrichable: &["rated_current", "breaking_capacity"],
            projection: ProjectionScheme::Flat {
                prefix: "breaker",
                fields: &[
                    "brand_name",
                    "model_name",
                    "scope_text",
                    "rated_current",
                    "poles",
                    "breaking_capacity",
                ],
            },
        },
        CollectionSpec {
            entity_type: EntityType::ProtectionCables,
            rules: rules::cable_rules(),
            column_map: BRAND_MODEL_COLUMNS,
            business_key: BRAND_MODEL_KEY,
            enrichable: &["section_mm2"],
            projection: ProjectionScheme::Flat {
                prefix: "cable",
                fields: &[
                    "brand_name",
                    "model_name",
                    "scope_text",
                    "section_mm2",
                    "insulation",
                    "conductor",
                    "length_m",
                ],
            },
        },
        CollectionSpec {
            entity_type: EntityType::ClampMeasurements,
            rules: rules::clamp_rules(),
            column_map: &[("circuit", "circuit_name")],
            business_key: &[],
            enrichable: &[],
            projection: ProjectionScheme::Flat {
                prefix: "clamp",
                fields: &[
                    "circuit_name",
                    "current_l1",
                    "current_l2",
                    "current_l3",
                    "leakage_ma",
                ],
            },
        },
        CollectionSpec {
            entity_type: EntityType::StringMeasurements,
            rules: rules::string_rules(),
            column_map: &[],
            business_key: &[],
            enrichable: &[],
            projection: ProjectionScheme::Positional {
                prefix: "string",
                index_field: "inverter_index",
                ref_id_field: "inverter_id",
                channel_field: "channel",
                subchannel_field: "subchannel",
                value_fields: &["voltage_v", "current_a"],
            },
        },
        CollectionSpec {
            entity_type: EntityType::TelemetryCredentials,
            rules: rules::credential_rules(),
            column_map: &[],
            business_key: &[],
            enrichable: &[],
            projection: ProjectionScheme::Flat {
                prefix: "credential",
                fields: &["system_name", "server", "username", "password"],
            },
        },
        CollectionSpec {
            entity_type: EntityType::CommunicationDevices,
            rules: rules::device_rules(),
            column_map: BRAND_MODEL_COLUMNS,
            business_key: &[],
            enrichable: &[],
            projection: ProjectionScheme::Flat {
                prefix: "comm",
                fields: &[
                    "device_type",
                    "brand_name",
                    "model_name",
                    "serial_number",
                    "ip_address",
                    "firmware",
                ],
            },
        },
        CollectionSpec {
            entity_type: EntityType::SmartMeters,
            rules: rules::smart_meter_rules(),
            column_map: BRAND_MODEL_COLUMNS,
            business_key: BRAND_MODEL_KEY,
            enrichable: &["ct_ratio"],
            projection: ProjectionScheme::Flat {
                prefix: "smart_meter",
                fields: &[
                    "brand_name",
                    "model_name",
                    "serial_number",
                    "meter_point",
                    "ct_ratio",
                ],
            },
        },
        CollectionSpec {
            entity_type: EntityType::EnergyMeters,
            rules: rules::energy_meter_rules(),
            column_map: BRAND_MODEL_COLUMNS,
            business_key: &[],
            enrichable: &[],
            projection: ProjectionScheme::Flat {
                prefix: "energy_meter",
                fields: &[
                    "brand_name",
                    "model_name",
                    "serial_number",
                    "register_import",
                    "register_export",
                ],
            },
        },
        CollectionSpec {
            entity_type: EntityType::PunchListItems,
            rules: rules::punch_rules(),
            column_map: &[],
            business_key: &[],
            enrichable: &[],
            projection: ProjectionScheme::Flat {
                prefix: "punch",
                fields: &["description", "severity", "status", "due_date"],
            },
        },
    ];

    specs.into_iter().map(|s| (s.entity_type, s)).collect()
}
