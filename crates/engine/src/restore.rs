use std::time::{Duration, Instant};

use tracing::{debug, warn};

use redraft_core::RestoreSessionId;

use crate::projection::KeyMap;

/// The live client state the session writes into. The engine only relies on
/// the addressing agreement: elements are locatable by the exact keys the
/// projection produced.
pub trait UiSurface {
    fn has_element(&self, key: &str) -> bool;
    fn set_value(&mut self, key: &str, value: &str);
}

/// Where the waiting happens. Production drivers sleep; the harness records.
/// Keeping this a seam lets a host with a real "surface constructed" signal
/// drive the session without polling at all.
pub trait Pacer {
    fn wait(&mut self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn wait(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RestoreConfig {
    pub probe_interval: Duration,
    pub max_attempts: u32,
    /// Delays of the two defensive reapplication passes after a successful
    /// apply. They paper over a competing, slower initialization path that
    /// may write stale values after us; a mitigation, not a guarantee.
    pub reapply_delays: [Duration; 2],
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            probe_interval: Duration::from_millis(100),
            max_attempts: 80,
            reapply_delays: [Duration::from_secs(1), Duration::from_secs(3)],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Pending,
    Probing,
    Applied,
    Exhausted,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Applied | Self::Exhausted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Probing => "probing",
            Self::Applied => "applied",
            Self::Exhausted => "exhausted",
        }
    }
}

/// Bounded-retry application of a projected key map onto a UI surface that
/// may not exist yet. One session per page load; terminal states are final
/// and a later report-open simply builds a new session.
pub struct RestorationSession {
    session_id: RestoreSessionId,
    key_map: KeyMap,
    probe_key: Option<String>,
    config: RestoreConfig,
    attempts: u32,
    state: SessionState,
    passes: Vec<Instant>,
}

impl RestorationSession {
    pub fn new(key_map: KeyMap, config: RestoreConfig) -> Self {
        // Construction is all-or-nothing per collection, so any single key
        // is a representative probe; the first is deterministic.
        let probe_key = key_map.keys().next().cloned();
        Self {
            session_id: RestoreSessionId::new(),
            key_map,
            probe_key,
            config,
            attempts: 0,
            state: SessionState::Pending,
            passes: Vec::new(),
        }
    }

    pub fn session_id(&self) -> RestoreSessionId {
        self.session_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn key_count(&self) -> usize {
        self.key_map.len()
    }

    /// Instants at which apply passes ran.
    pub fn passes(&self) -> &[Instant] {
        &self.passes
    }

    /// One probe step. Writes happen only on the transition to `Applied`;
    /// calling again in a terminal state is a no-op.
    pub fn poll(&mut self, surface: &mut dyn UiSurface) -> SessionState {
        if self.state.is_terminal() {
            return self.state;
        }
        self.state = SessionState::Probing;

        let ready = match &self.probe_key {
            // Nothing to restore is success, not exhaustion
            None => true,
            Some(key) => surface.has_element(key),
        };

        if ready {
            self.apply(surface);
            self.state = SessionState::Applied;
            return self.state;
        }

        self.attempts += 1;
        if self.attempts >= self.config.max_attempts {
            warn!(
                session_id = %self.session_id,
                attempts = self.attempts,
                keys = self.key_map.len(),
                "ui surface never became ready, leaving collection unrestored"
            );
            self.state = SessionState::Exhausted;
        }
        self.state
    }

    /// Write every key to the surface. Idempotent: a second pass writes the
    /// same values to the same elements and nothing else.
    pub fn apply(&mut self, surface: &mut dyn UiSurface) {
        for (key, value) in &self.key_map {
            surface.set_value(key, value);
        }
        self.passes.push(Instant::now());
        debug!(
            session_id = %self.session_id,
            keys = self.key_map.len(),
            pass = self.passes.len(),
            "key map applied"
        );
    }

    /// Drive the session to a terminal state: probe at the configured
    /// interval, then run the two defensive reapplication passes.
    pub fn run(&mut self, surface: &mut dyn UiSurface, pacer: &mut dyn Pacer) -> SessionState {
        loop {
            match self.poll(surface) {
                SessionState::Applied => break,
                SessionState::Exhausted => return SessionState::Exhausted,
                SessionState::Pending | SessionState::Probing => {
                    pacer.wait(self.config.probe_interval);
                }
            }
        }

        for delay in self.config.reapply_delays {
            pacer.wait(delay);
            self.apply(surface);
        }
        SessionState::Applied
    }
}
