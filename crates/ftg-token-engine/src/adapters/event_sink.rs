//! # Event Sinks
//!
//! `RecordingEventSink` keeps events in memory for indexers and tests.
//! `TracingEventSink` logs each event as a structured JSON record.

use crate::events::TokenEvent;
use crate::ports::outbound::EventSink;
use parking_lot::RwLock;
use tracing::{info, warn};

/// Sink that records every published event.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: RwLock<Vec<TokenEvent>>,
}

impl RecordingEventSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events so far.
    #[must_use]
    pub fn events(&self) -> Vec<TokenEvent> {
        self.events.read().clone()
    }

    /// Names of all events so far.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.events.read().iter().map(TokenEvent::name).collect()
    }

    /// Number of events so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// True when nothing was published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Remove and return all events.
    pub fn drain(&self) -> Vec<TokenEvent> {
        std::mem::take(&mut *self.events.write())
    }
}

impl EventSink for RecordingEventSink {
    fn publish(&self, event: &TokenEvent) {
        self.events.write().push(event.clone());
    }
}

/// Sink that logs events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: &TokenEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => info!(event = event.name(), %payload, "token event"),
            Err(e) => warn!(event = event.name(), error = %e, "unserializable token event"),
        }
    }
}
