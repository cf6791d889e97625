use std::time::Duration;

use redraft_engine::Pacer;

/// Pacer that records every wait instead of sleeping, so restoration tests
/// run instantly and can assert on the schedule the session asked for.
#[derive(Debug, Default)]
pub struct RecordingPacer {
    waits: Vec<Duration>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }

    pub fn total_waited(&self) -> Duration {
        self.waits.iter().sum()
    }
}

impl Pacer for RecordingPacer {
    fn wait(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}
