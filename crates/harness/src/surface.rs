use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

use redraft_engine::UiSurface;

/// Map-backed UI surface for tests. Elements either exist from the start or
/// appear after a configurable number of observed probes, which simulates
/// the asynchronously-constructed client state the engine races against.
/// Writes to elements that do not exist yet are lost, as on a real surface.
#[derive(Debug, Default)]
pub struct FakeSurface {
    constructed: BTreeSet<String>,
    deferred: BTreeSet<String>,
    ready_after_probes: u32,
    probes: Cell<u32>,
    values: BTreeMap<String, String>,
    write_counts: BTreeMap<String, u32>,
}

impl FakeSurface {
    /// A surface with no elements, ever.
    pub fn never_constructed() -> Self {
        Self::default()
    }

    /// All elements exist from the first probe.
    pub fn with_elements<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            constructed: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Elements appear only once `ready_after_probes` probes have been
    /// observed, all at once.
    pub fn constructing<I, S>(keys: I, ready_after_probes: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            deferred: keys.into_iter().map(Into::into).collect(),
            ready_after_probes,
            ..Self::default()
        }
    }

    fn deferred_ready(&self) -> bool {
        self.probes.get() >= self.ready_after_probes
    }

    fn element_exists(&self, key: &str) -> bool {
        self.constructed.contains(key) || (self.deferred.contains(key) && self.deferred_ready())
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn write_count(&self, key: &str) -> u32 {
        self.write_counts.get(key).copied().unwrap_or(0)
    }

    pub fn total_writes(&self) -> u32 {
        self.write_counts.values().sum()
    }

    pub fn probes(&self) -> u32 {
        self.probes.get()
    }

    /// Current element values, for whole-state comparisons.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.clone()
    }

    /// Simulate the external, slower initialization path writing a value
    /// behind the session's back.
    pub fn overwrite(&mut self, key: &str, value: &str) {
        if self.element_exists(key) {
            self.values.insert(key.to_string(), value.to_string());
        }
    }
}

impl UiSurface for FakeSurface {
    fn has_element(&self, key: &str) -> bool {
        self.probes.set(self.probes.get() + 1);
        self.element_exists(key)
    }

    fn set_value(&mut self, key: &str, value: &str) {
        if !self.element_exists(key) {
            return;
        }
        self.values.insert(key.to_string(), value.to_string());
        *self.write_counts.entry(key.to_string()).or_default() += 1;
    }
}
