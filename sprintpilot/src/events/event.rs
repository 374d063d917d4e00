//! Typed stage-run events.

use serde::Serialize;
use uuid::Uuid;

use crate::core::{StageId, StoreKey};

/// One transition of a stage run.
///
/// Every variant carries the stage and the run id, so a sink can correlate
/// the events of one run without parsing anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PipelineEvent {
    /// The run was accepted and is about to check its gate.
    #[serde(rename = "stage.started")]
    StageStarted {
        /// The stage.
        stage: StageId,
        /// The run.
        run_id: Uuid,
    },

    /// The upstream output was absent; no request was issued.
    #[serde(rename = "stage.gated")]
    StageGated {
        /// The stage.
        stage: StageId,
        /// The run.
        run_id: Uuid,
        /// The key the gate looked for.
        missing: StoreKey,
    },

    /// The response was written to the store.
    #[serde(rename = "store.updated")]
    StoreUpdated {
        /// The stage.
        stage: StageId,
        /// The run.
        run_id: Uuid,
        /// The key that now holds the response.
        key: StoreKey,
    },

    /// The run finished successfully.
    #[serde(rename = "stage.completed")]
    StageCompleted {
        /// The stage.
        stage: StageId,
        /// The run.
        run_id: Uuid,
        /// Wall time of the run.
        duration_ms: f64,
        /// Where the response was persisted, if anywhere.
        persisted_as: Option<StoreKey>,
    },

    /// The run failed after passing its gate.
    #[serde(rename = "stage.failed")]
    StageFailed {
        /// The stage.
        stage: StageId,
        /// The run.
        run_id: Uuid,
        /// The operator-facing error message.
        error: String,
    },
}

impl PipelineEvent {
    /// Returns the dotted event name, e.g. `stage.gated`.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::StageStarted { .. } => super::STAGE_STARTED,
            Self::StageGated { .. } => super::STAGE_GATED,
            Self::StoreUpdated { .. } => super::STORE_UPDATED,
            Self::StageCompleted { .. } => super::STAGE_COMPLETED,
            Self::StageFailed { .. } => super::STAGE_FAILED,
        }
    }

    /// Returns the stage the event belongs to.
    #[must_use]
    pub const fn stage(&self) -> StageId {
        match self {
            Self::StageStarted { stage, .. }
            | Self::StageGated { stage, .. }
            | Self::StoreUpdated { stage, .. }
            | Self::StageCompleted { stage, .. }
            | Self::StageFailed { stage, .. } => *stage,
        }
    }

    /// Returns the run the event belongs to.
    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        match self {
            Self::StageStarted { run_id, .. }
            | Self::StageGated { run_id, .. }
            | Self::StoreUpdated { run_id, .. }
            | Self::StageCompleted { run_id, .. }
            | Self::StageFailed { run_id, .. } => *run_id,
        }
    }

    /// Returns true for the event that ends a run.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::StageGated { .. } | Self::StageCompleted { .. } | Self::StageFailed { .. }
        )
    }
}
