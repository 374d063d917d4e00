//! Receivers for [`PipelineEvent`]s.

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info, Level};
use uuid::Uuid;

use super::PipelineEvent;
use crate::core::StageId;

/// Receives the events of every stage run.
///
/// The pipeline awaits [`EventSink::emit`] while a run is in progress and
/// calls [`EventSink::record`] for the terminal event, after the run's
/// result is already decided.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Receives an event from a run in progress.
    async fn emit(&self, event: &PipelineEvent) {
        self.record(event);
    }

    /// Receives an event without awaiting. Must never fail.
    fn record(&self, event: &PipelineEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

impl EventSink for NoOpEventSink {
    fn record(&self, _event: &PipelineEvent) {}
}

/// Logs events through `tracing`, keyed by stage and run id.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a sink logging at `level`. Anything but `DEBUG` logs at `INFO`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level sink.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }
}

impl EventSink for LoggingEventSink {
    fn record(&self, event: &PipelineEvent) {
        let stage = event.stage();
        let run_id = event.run_id();
        if self.level == Level::DEBUG {
            debug!(%stage, %run_id, detail = ?event, "{}", event.event_type());
        } else {
            info!(%stage, %run_id, detail = ?event, "{}", event.event_type());
        }
    }
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl CollectingEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every event received.
    #[must_use]
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().clone()
    }

    /// Returns the dotted event names in arrival order.
    #[must_use]
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(PipelineEvent::event_type).collect()
    }

    /// Returns the events of one stage.
    #[must_use]
    pub fn for_stage(&self, stage: StageId) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.stage() == stage)
            .cloned()
            .collect()
    }

    /// Returns the events of one run.
    #[must_use]
    pub fn for_run(&self, run_id: Uuid) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.run_id() == run_id)
            .cloned()
            .collect()
    }

    /// Returns the number of events received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns true if nothing was received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Forgets every event.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for CollectingEventSink {
    fn record(&self, event: &PipelineEvent) {
        self.events.lock().push(event.clone());
    }
}
