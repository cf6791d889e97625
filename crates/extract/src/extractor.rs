use std::collections::BTreeMap;

use crate::rules::RuleSet;

/// Field name → normalized value, for one characteristics string. A field
/// that matched nothing is absent from the map; callers must be able to tell
/// "never mentioned" from "mentioned and blank".
pub type ExtractedFields = BTreeMap<String, String>;

/// Split a characteristics string into `(label, value)` segments.
/// Grammar: segments joined by `|`, each `label ':' value`, both sides
/// trimmed. Segments without a colon are dropped, not errors.
pub fn split_segments(characteristics: &str) -> Vec<(String, String)> {
    characteristics
        .split('|')
        .filter_map(|segment| {
            let (label, value) = segment.split_once(':')?;
            let label = label.trim();
            if label.is_empty() {
                return None;
            }
            Some((label.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Run a rule table over one characteristics string. Pure and total: any
/// input, including the empty string, yields a map; malformed segments are
/// skipped. Candidate label patterns are tried in declaration order and the
/// first match wins. Numeric fields get decimal commas normalized to dots
/// when the value reads as a number.
pub fn extract(characteristics: &str, rules: &RuleSet) -> ExtractedFields {
    let segments = split_segments(characteristics);
    let mut fields = ExtractedFields::new();

    for rule in rules.rules() {
        let matched = rule.candidates().iter().find_map(|candidate| {
            segments
                .iter()
                .find(|(label, _)| candidate.is_match(label))
                .map(|(_, value)| value.as_str())
        });
        if let Some(value) = matched {
            let value = if rule.is_numeric() {
                normalize_decimal(value)
            } else {
                value.to_string()
            };
            fields.insert(rule.field().to_string(), value);
        }
    }

    fields
}

/// `,` → `.` when the result reads as a number; otherwise the raw value is
/// kept so downstream layers see what the user typed.
fn normalize_decimal(value: &str) -> String {
    let normalized = value.replace(',', ".");
    if normalized.trim().parse::<f64>().is_ok() {
        normalized
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{breaker_rules, FieldRule, RuleSet};

    #[test]
    fn candidate_order_wins_over_segment_order() {
        // "Rated Current (A)" is the most specific candidate; "In" the last
        let rules = breaker_rules();
        let fields = extract("In: 16 | Rated Current (A): 630", &rules);
        assert_eq!(fields.get("rated_current").map(String::as_str), Some("630"));
    }

    #[test]
    fn falls_back_through_candidates() {
        let rules = breaker_rules();
        let fields = extract("Scope: PV Board | Rated: 630", &rules);
        assert_eq!(fields.get("rated_current").map(String::as_str), Some("630"));
        assert_eq!(fields.get("scope_text").map(String::as_str), Some("PV Board"));
        assert_eq!(fields.get("poles"), None);
    }

    #[test]
    fn decimal_comma_normalized_for_numeric_fields() {
        let rules = RuleSet::new(vec![FieldRule::numeric("section_mm2", &[r"section"])]);
        let fields = extract("Section: 2,5", &rules);
        assert_eq!(fields.get("section_mm2").map(String::as_str), Some("2.5"));
    }

    #[test]
    fn non_numeric_value_in_numeric_field_kept_raw() {
        let rules = RuleSet::new(vec![FieldRule::numeric("length_m", &[r"length"])]);
        let fields = extract("Length: t.b.c,", &rules);
        assert_eq!(fields.get("length_m").map(String::as_str), Some("t.b.c,"));
    }

    #[test]
    fn malformed_segments_are_skipped() {
        let rules = breaker_rules();
        let fields = extract("garbage with no colon | Rated: 40 | : dangling", &rules);
        assert_eq!(fields.get("rated_current").map(String::as_str), Some("40"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn empty_and_nonsense_inputs_yield_empty_maps() {
        let rules = breaker_rules();
        assert!(extract("", &rules).is_empty());
        assert!(extract("|||", &rules).is_empty());
        assert!(extract("no delimiters here", &rules).is_empty());
    }

    #[test]
    fn extraction_is_deterministic() {
        let rules = breaker_rules();
        let input = "Scope: DC Box | Rated: 125 | Poles: 4";
        assert_eq!(extract(input, &rules), extract(input, &rules));
    }

    #[test]
    fn value_may_contain_colons() {
        let rules = RuleSet::new(vec![FieldRule::text("server", &[r"server"])]);
        let fields = extract("Server: https://scada.example.com:8443", &rules);
        assert_eq!(
            fields.get("server").map(String::as_str),
            Some("https://scada.example.com:8443")
        );
    }

    #[test]
    fn labels_match_case_insensitively() {
        let rules = breaker_rules();
        let fields = extract("RATED CURRENT (A): 250", &rules);
        assert_eq!(fields.get("rated_current").map(String::as_str), Some("250"));
    }
}
