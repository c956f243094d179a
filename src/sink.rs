//! Diagnostic sinks for processed payloads.
//!
//! `POST /process` hands every parsed payload to a [`PayloadSink`] held in
//! application state. Production uses [`TracingSink`]; tests swap in
//! [`MemorySink`] to observe the side effect directly.

use std::sync::Mutex;

use serde_json::Value;

use crate::middleware::Payload;

/// Receiver for payloads accepted by the process endpoint.
pub trait PayloadSink: Send + Sync {
    fn record(&self, payload: &Payload);
}

/// Emits one `info` event per payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl PayloadSink for TracingSink {
    fn record(&self, payload: &Payload) {
        tracing::info!(payload = %payload.to_value(), "Processing payload");
    }
}

/// Keeps every recorded payload in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    payloads: Mutex<Vec<Value>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, oldest first.
    pub fn payloads(&self) -> Vec<Value> {
        self.payloads
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl PayloadSink for MemorySink {
    fn record(&self, payload: &Payload) {
        if let Ok(mut guard) = self.payloads.lock() {
            guard.push(payload.to_value());
        }
    }
}
