use regex::Regex;

/// One declared output field of an extraction grammar: the field name and
/// the ordered candidate label patterns that can carry it. Candidates are
/// tried in declaration order; the first one matching any segment label
/// wins, so the most specific label spelling goes first.
#[derive(Debug)]
pub struct FieldRule {
    field: &'static str,
    labels: Vec<Regex>,
    numeric: bool,
}

impl FieldRule {
    pub fn text(field: &'static str, candidates: &[&str]) -> Self {
        Self::compile(field, candidates, false)
    }

    pub fn numeric(field: &'static str, candidates: &[&str]) -> Self {
        Self::compile(field, candidates, true)
    }

    fn compile(field: &'static str, candidates: &[&str], numeric: bool) -> Self {
        let labels = candidates
            .iter()
            .map(|c| Regex::new(&format!("(?i)^(?:{c})$")).unwrap())
            .collect();
        Self {
            field,
            labels,
            numeric,
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    pub fn candidates(&self) -> &[Regex] {
        &self.labels
    }
}

/// The extraction grammar of one entity type: an ordered rule table over the
/// labels of its characteristics string.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }
}

pub fn inverter_rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::text("inverter_id", &[r"code", r"id", r"name"]),
        FieldRule::text("serial_number", &[r"serial\s*number", r"serial", r"s/n"]),
        FieldRule::numeric("rated_power_kw", &[r"rated\s*power\s*\(kw\)", r"power"]),
    ])
}

pub fn breaker_rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::text("scope_text", &[r"scope"]),
        FieldRule::numeric(
            "rated_current",
            &[r"rated\s*current\s*\(a\)", r"rated", r"in"],
        ),
        FieldRule::numeric("poles", &[r"poles", r"no\.?\s*of\s*poles"]),
        FieldRule::numeric("breaking_capacity", &[r"breaking\s*capacity\s*\(ka\)", r"icu"]),
    ])
}

pub fn cable_rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::text("scope_text", &[r"scope"]),
        FieldRule::numeric("section_mm2", &[r"section\s*\(mm2\)", r"section", r"cross\s*section"]),
        FieldRule::text("insulation", &[r"insulation"]),
        FieldRule::text("conductor", &[r"conductor", r"material"]),
        FieldRule::numeric("length_m", &[r"length\s*\(m\)", r"length"]),
    ])
}

pub fn clamp_rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::text("circuit_name", &[r"circuit"]),
        FieldRule::numeric("current_l1", &[r"current\s*l1\s*\(a\)", r"l1"]),
        FieldRule::numeric("current_l2", &[r"current\s*l2\s*\(a\)", r"l2"]),
        FieldRule::numeric("current_l3", &[r"current\s*l3\s*\(a\)", r"l3"]),
        FieldRule::numeric("leakage_ma", &[r"leakage\s*\(ma\)", r"leakage"]),
    ])
}

pub fn string_rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::text("inverter_id", &[r"inverter", r"unit"]),
        FieldRule::numeric("channel", &[r"channel", r"input"]),
        FieldRule::numeric("subchannel", &[r"sub-?channel", r"substring", r"string"]),
        FieldRule::numeric("voltage_v", &[r"voltage\s*\(v\)", r"voc", r"voltage"]),
        FieldRule::numeric("current_a", &[r"current\s*\(a\)", r"isc", r"current"]),
    ])
}

pub fn credential_rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::text("system_name", &[r"system"]),
        FieldRule::text("server", &[r"server", r"host"]),
        FieldRule::text("username", &[r"username", r"user"]),
        FieldRule::text("password", &[r"password", r"pass"]),
    ])
}

pub fn device_rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::text("device_type", &[r"type", r"device"]),
        FieldRule::text("serial_number", &[r"serial\s*number", r"serial", r"s/n"]),
        FieldRule::text("ip_address", &[r"ip\s*address", r"ip"]),
        FieldRule::text("firmware", &[r"firmware", r"fw"]),
    ])
}

pub fn smart_meter_rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::text("serial_number", &[r"serial\s*number", r"serial", r"s/n"]),
        FieldRule::text("meter_point", &[r"meter\s*point", r"mpan", r"cups"]),
        FieldRule::text("ct_ratio", &[r"ct\s*ratio", r"ratio"]),
    ])
}

pub fn energy_meter_rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::text("serial_number", &[r"serial\s*number", r"serial", r"s/n"]),
        FieldRule::numeric("register_import", &[r"import\s*\(kwh\)", r"import"]),
        FieldRule::numeric("register_export", &[r"export\s*\(kwh\)", r"export"]),
    ])
}

pub fn punch_rules() -> RuleSet {
    RuleSet::new(vec![
        FieldRule::text("description", &[r"description", r"item"]),
        FieldRule::text("severity", &[r"severity", r"priority"]),
        FieldRule::text("status", &[r"status"]),
        FieldRule::text("due_date", &[r"due\s*date", r"due"]),
    ])
}
