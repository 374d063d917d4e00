//! # SprintPilot
//!
//! A client for the SprintPilot planning backend.
//!
//! The backend exposes five stages. Four of them form a hand-off chain where
//! each stage consumes the stored output of the one before it:
//!
//! - **FR01** parses a free-text goal
//! - **FR02** decomposes the parsed goal into tasks
//! - **FR03** packs the tasks into sprints
//! - **FR04** suggests an edit to one task of the stored plan
//! - **FR05** predicts project success from a standalone form
//!
//! This crate drives those stages: it gates each stage on its upstream
//! output, issues the request, normalizes the response and persists it for
//! the next stage.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sprintpilot::prelude::*;
//! use std::sync::Arc;
//!
//! let config = ClientConfig::load(None)?;
//! let store = Arc::new(FileStageStore::new(&config.store_path));
//! let transport = Arc::new(HttpTransport::new(config)?);
//! let pipeline = Pipeline::new(store, transport);
//!
//! pipeline.run(&ParseGoal::new("Build a sprint planner in 8 weeks")).await?;
//! pipeline.run(&DecomposeTasks).await?;
//! let plan = pipeline.run(&PlanSprints::default()).await?;
//! println!("{}", plan.pretty_response());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod observability;
pub mod pipeline;
pub mod stages;
pub mod store;
pub mod testing;
pub mod transport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ClientConfig, LogConfig};
    pub use crate::core::{
        SprintPlanView, StageDescriptor, StageId, StageOutput, StageRun, StoreKey,
    };
    pub use crate::errors::{
        GateError, Result, SprintPilotError, StoreError, TransportError,
    };
    pub use crate::events::{
        CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink, PipelineEvent,
    };
    pub use crate::observability::init_tracing;
    pub use crate::pipeline::{
        default_chain, full_chain, BackendHealth, Pipeline, PipelineStatus, Replay,
    };
    pub use crate::stages::{
        parse_dependencies, DecomposeTasks, ParseGoal, PlanSprints, PredictSuccess,
        PredictionForm, Stage, SuggestTaskChange,
    };
    pub use crate::store::{FileStageStore, InMemoryStageStore, StageStore};
    pub use crate::transport::{HttpTransport, Transport};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_chain_order() {
        let stages: Vec<_> = full_chain().iter().map(|stage| stage.id()).collect();
        assert_eq!(stages, StageId::ALL.to_vec());
    }
}
