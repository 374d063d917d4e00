//! Pipeline driving.
//!
//! This module provides:
//! - The [`Pipeline`] runner with gating, persistence and re-trigger guard
//! - Chain replay for drivers that want every stage in order
//! - Status and backend health reports

mod guard;
mod runner;
mod status;

pub use guard::{InFlight, InFlightGuard};
pub use runner::Pipeline;
pub use status::{BackendHealth, PipelineStatus, Replay, StageReadiness};

use crate::stages::{
    DecomposeTasks, ParseGoal, PlanSprints, PredictSuccess, Stage, SuggestTaskChange,
};

/// The FR01..FR04 hand-off chain with default inputs.
///
/// FR05 is standalone and not part of the hand-off; append it when a replay
/// should exercise it too.
#[must_use]
pub fn default_chain() -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(ParseGoal::default()),
        Box::new(DecomposeTasks),
        Box::new(PlanSprints::default()),
        Box::new(SuggestTaskChange::default()),
    ]
}

/// Every stage with default inputs, in chain order.
#[must_use]
pub fn full_chain() -> Vec<Box<dyn Stage>> {
    let mut chain = default_chain();
    chain.push(Box::new(PredictSuccess::default()));
    chain
}
