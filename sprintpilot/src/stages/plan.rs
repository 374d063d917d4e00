//! FR03: pack the decomposed tasks into sprints.

use serde::Serialize;

use super::{require_upstream, Stage};
use crate::core::{StageId, StageOutput};
use crate::errors::Result;

/// Planning parameters sent with the stored decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSprints {
    /// Sprint length in days.
    pub sprint_length_days: i64,
    /// Work days the team completes per sprint.
    pub velocity_days_per_sprint: i64,
    /// Ask the backend to add LLM notes to each sprint.
    pub enrich_with_llm: bool,
}

impl Default for PlanSprints {
    fn default() -> Self {
        Self {
            sprint_length_days: 14,
            velocity_days_per_sprint: 14,
            enrich_with_llm: true,
        }
    }
}

#[derive(Serialize)]
struct PlanRequest<'a> {
    fr02: &'a StageOutput,
    sprint_length_days: i64,
    velocity_days_per_sprint: i64,
    enrich_with_llm: bool,
}

impl Stage for PlanSprints {
    fn id(&self) -> StageId {
        StageId::Fr03
    }

    fn build_request(&self, upstream: Option<&StageOutput>) -> Result<serde_json::Value> {
        let fr02 = require_upstream(self.id(), upstream)?;
        Ok(serde_json::to_value(PlanRequest {
            fr02,
            sprint_length_days: self.sprint_length_days,
            velocity_days_per_sprint: self.velocity_days_per_sprint,
            enrich_with_llm: self.enrich_with_llm,
        })?)
    }
}
