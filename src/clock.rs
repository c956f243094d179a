//! Process start time and uptime.

use std::time::Instant;

/// The instant the service initialized. Captured once and never mutated,
/// so it can be copied freely into every handler.
#[derive(Debug, Clone, Copy)]
pub struct ProcessClock {
    started: Instant,
}

impl ProcessClock {
    /// Capture the current instant as process start.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Seconds elapsed since start, with sub-second precision.
    pub fn uptime_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}
