//! The five pipeline stages.
//!
//! A stage only knows how to turn its local input (and, for gated stages,
//! the upstream output) into a request body. Gating, the network call and
//! persistence are the pipeline's job, driven by the stage's
//! [`StageDescriptor`](crate::core::StageDescriptor).

mod decompose;
mod goal;
mod plan;
mod predict;
mod suggest;

pub use decompose::DecomposeTasks;
pub use goal::{ParseGoal, DEFAULT_GOAL_TEXT};
pub use plan::PlanSprints;
pub use predict::{PredictSuccess, PredictionForm};
pub use suggest::{parse_dependencies, SuggestTaskChange};

use crate::core::{is_truthy, StageId, StageOutput};
use crate::errors::{GateError, Result, SprintPilotError};
use std::fmt::Debug;

/// Trait for pipeline stages.
pub trait Stage: Send + Sync + Debug {
    /// Returns the stage this implementation runs.
    fn id(&self) -> StageId;

    /// Builds the request body.
    ///
    /// `upstream` is the stored output named by the stage's gate, or `None`
    /// for stages without one.
    fn build_request(&self, upstream: Option<&StageOutput>) -> Result<serde_json::Value>;
}

/// Returns the upstream output or the stage's gate error.
fn require_upstream(id: StageId, upstream: Option<&StageOutput>) -> Result<&StageOutput> {
    match (upstream, id.descriptor().requires) {
        (Some(value), _) if is_truthy(value) => Ok(value),
        (_, Some(gate)) => Err(GateError::new(id, gate.key, gate.message).into()),
        (_, None) => Err(SprintPilotError::Config(format!(
            "{id} does not read an upstream output"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StoreKey;

    #[test]
    fn test_require_upstream_reports_gate() {
        let err = require_upstream(StageId::Fr03, None).unwrap_err();
        match err {
            SprintPilotError::Gate(gate) => {
                assert_eq!(gate.missing, StoreKey::Fr02Out);
                assert_eq!(gate.message, "No FR02 output found. Run FR02 first.");
            }
            other => panic!("expected gate error, got {other:?}"),
        }
    }

    #[test]
    fn test_require_upstream_treats_null_as_missing() {
        let null = serde_json::Value::Null;
        assert!(require_upstream(StageId::Fr02, Some(&null)).unwrap_err().is_gate());
    }
}
