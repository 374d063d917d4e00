//! Reports produced by the pipeline besides stage runs.

use serde::Serialize;

use crate::core::{SprintPlanView, StageId, StageRun, StoreKey};
use crate::errors::SprintPilotError;

/// Whether a stage's gate is currently satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReadiness {
    /// The stage.
    pub stage: StageId,
    /// The upstream key it needs, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<StoreKey>,
    /// True if running it now would pass the gate.
    pub ready: bool,
}

/// Snapshot of the store as seen by the stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStatus {
    /// Keys holding an output, in chain order.
    pub present: Vec<StoreKey>,
    /// Per-stage gate state, in chain order.
    pub stages: Vec<StageReadiness>,
    /// Goal of the stored plan, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_goal: Option<String>,
    /// Number of task titles FR04 would submit, when a plan is stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_task_count: Option<usize>,
}

impl PipelineStatus {
    /// Builds the status from the present keys and the stored plan.
    #[must_use]
    pub fn new(present: Vec<StoreKey>, plan: Option<&SprintPlanView>) -> Self {
        let stages = StageId::ALL
            .iter()
            .map(|&stage| {
                let requires = stage.descriptor().requires.map(|gate| gate.key);
                StageReadiness {
                    stage,
                    requires,
                    ready: requires.map_or(true, |key| present.contains(&key)),
                }
            })
            .collect();

        Self {
            present,
            stages,
            plan_goal: plan.map(|p| p.goal().to_string()),
            plan_task_count: plan.map(|p| p.task_titles().len()),
        }
    }

    /// Returns true if `key` holds an output.
    #[must_use]
    pub fn has(&self, key: StoreKey) -> bool {
        self.present.contains(&key)
    }
}

/// Result of probing the backend's GET endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendHealth {
    /// `GET /health`.
    pub api: Result<serde_json::Value, String>,
    /// `GET /fr05/status`.
    pub predictor: Result<serde_json::Value, String>,
}

impl BackendHealth {
    /// Returns true if the liveness probe succeeded.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.api.is_ok()
    }

    /// Renders the probes as one JSON document.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        fn probe(result: &Result<serde_json::Value, String>) -> serde_json::Value {
            match result {
                Ok(body) => serde_json::json!({"ok": true, "body": body}),
                Err(error) => serde_json::json!({"ok": false, "error": error}),
            }
        }
        serde_json::json!({
            "health": probe(&self.api),
            "fr05_status": probe(&self.predictor),
        })
    }
}

/// Outcome of replaying a chain of stages.
#[derive(Debug, Default)]
pub struct Replay {
    /// Runs that completed, in order.
    pub runs: Vec<StageRun>,
    /// The error that stopped the chain, if any.
    pub failure: Option<SprintPilotError>,
}

impl Replay {
    /// Returns true if every stage ran.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Converts into the runs, or the stopping error.
    pub fn into_result(self) -> Result<Vec<StageRun>, SprintPilotError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.runs),
        }
    }
}
