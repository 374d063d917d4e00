//! Event sinks for stage-run observability.
//!
//! The pipeline emits one [`PipelineEvent`] per transition of a stage run.
//! Sinks are injected into the pipeline; the default discards everything.

mod event;
mod sink;

pub use event::PipelineEvent;
pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

/// A stage run started.
pub const STAGE_STARTED: &str = "stage.started";
/// A stage refused to run because its upstream output was missing.
pub const STAGE_GATED: &str = "stage.gated";
/// A stage run completed successfully.
pub const STAGE_COMPLETED: &str = "stage.completed";
/// A stage run failed after the gate.
pub const STAGE_FAILED: &str = "stage.failed";
/// A stage output was written to the store.
pub const STORE_UPDATED: &str = "store.updated";
