use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use redraft_core::{FieldValue, Record};

use crate::context::ReconciledCollection;
use crate::spec::{spec_for, ProjectionScheme};

/// UI-addressable key → value. Derived deterministically from a reconciled
/// collection; empty values are never inserted, so restoration cannot
/// clobber an element with blank text.
pub type KeyMap = BTreeMap<String, String>;

/// Unit identifiers like `INV003` or `unit012`: alphabetic stem, optional
/// separator, zero-padded ordinal.
static ORDINAL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+[-_ ]?0*(\d+)$").unwrap());

/// Project a reconciled collection into the UI's flat key addressing.
/// `references` is the ordered reconciled units collection, consulted only
/// by positional schemes.
pub fn project_collection(collection: &ReconciledCollection, references: &[Record]) -> KeyMap {
    let spec = spec_for(collection.entity_type);
    let mut map = KeyMap::new();

    match &spec.projection {
        ProjectionScheme::Flat { prefix, fields } => {
            for (index, record) in collection.records.iter().enumerate() {
                for field in *fields {
                    let value = record.get(field).to_display_string();
                    guarded_insert(&mut map, format!("{prefix}_{field}_{index}"), value);
                }
            }
        }
        ProjectionScheme::Positional {
            prefix,
            index_field,
            ref_id_field,
            channel_field,
            subchannel_field,
            value_fields,
        } => {
            for record in &collection.records {
                let unit = resolve_unit_index(record, index_field, ref_id_field, references);
                let channel = ordinal_field(record, channel_field);
                let subchannel = ordinal_field(record, subchannel_field);
                for field in *value_fields {
                    let value = record.get(field).to_display_string();
                    guarded_insert(
                        &mut map,
                        format!("{prefix}_{field}_{unit}_{channel}_{subchannel}"),
                        value,
                    );
                }
            }
        }
    }

    map
}

/// Resolve the unit index of a positional record:
/// 1. explicit index field;
/// 2. foreign id looked up in the ordered reference list (first match wins);
/// 3. ordinal naming pattern on the foreign id (`INV003` → 2);
/// 4. 0.
pub fn resolve_unit_index(
    record: &Record,
    index_field: &str,
    ref_id_field: &str,
    references: &[Record],
) -> usize {
    if let Some(index) = record.get(index_field).numeric_value()
        && index >= 0.0
    {
        return index as usize;
    }

    let Some(id) = record.field_str(ref_id_field).map(str::trim).filter(|s| !s.is_empty())
    else {
        return 0;
    };

    if let Some(position) = references.iter().position(|unit| {
        unit.field_str(ref_id_field)
            .is_some_and(|u| u.trim().eq_ignore_ascii_case(id))
    }) {
        return position;
    }

    if let Some(captures) = ORDINAL_ID.captures(id)
        && let Ok(ordinal) = captures[1].parse::<usize>()
    {
        return ordinal.saturating_sub(1);
    }

    0
}

/// Channel numbers come from the record when present; the UI numbers
/// channels from 1, so that is the default.
fn ordinal_field(record: &Record, field: &str) -> u32 {
    match record.get(field).numeric_value() {
        Some(n) if n >= 0.0 => n as u32,
        _ => 1,
    }
}

fn guarded_insert(map: &mut KeyMap, key: String, value: String) {
    if value.trim().is_empty() {
        return;
    }
    if let Some(existing) = map.get(&key) {
        let existing = FieldValue::Text(existing.clone());
        let incoming = FieldValue::Text(value.clone());
        if !FieldValue::overwrite_allowed(&existing, &incoming) {
            debug!(%key, "zero value blocked from replacing accumulated entry");
            return;
        }
    }
    map.insert(key, value);
}
