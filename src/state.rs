//! Shared application state for request handlers.

use std::sync::Arc;

use crate::clock::ProcessClock;
use crate::config::AppConfig;
use crate::sink::{PayloadSink, TracingSink};

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the configuration, the process clock used for uptime, and the
/// diagnostic sink that receives processed payloads.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub clock: ProcessClock,
    pub sink: Arc<dyn PayloadSink>,
}

impl AppState {
    /// Creates state that logs payloads through `tracing`.
    pub fn new(config: AppConfig, clock: ProcessClock) -> Self {
        Self::with_sink(config, clock, Arc::new(TracingSink))
    }

    /// Creates state with a caller-supplied payload sink.
    pub fn with_sink(config: AppConfig, clock: ProcessClock, sink: Arc<dyn PayloadSink>) -> Self {
        Self {
            config: Arc::new(config),
            clock,
            sink,
        }
    }

    pub fn body_limit(&self) -> usize {
        self.config.http.body_limit_bytes
    }
}
