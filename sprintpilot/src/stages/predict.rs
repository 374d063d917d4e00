//! FR05: predict task success from a flat feature form.

use serde::{Deserialize, Serialize};

use super::Stage;
use crate::core::{StageId, StageOutput};
use crate::errors::Result;

/// The predictor's input features, sent as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionForm {
    /// Task category, e.g. `Bug` or `Feature`.
    pub task_type: String,
    /// Role of the assignee.
    pub assignee_role: String,
    /// Assignee experience in years.
    pub experience_years: i64,
    /// Team head count.
    pub team_size: i64,
    /// Sprint length in days.
    pub sprint_length_days: i64,
    /// Story points of the task.
    pub story_points: i64,
    /// Estimated effort in hours.
    pub estimated_hours: i64,
    /// Number of upstream dependencies.
    pub dependencies_count: i64,
    /// Number of open blockers.
    pub blockers_count: i64,
    /// One of `Must`, `Should`, `Could`, `Won't`.
    pub priority_moscow: String,
    /// Requirement changes seen so far.
    pub requirement_changes: i64,
    /// Messages exchanged about the task.
    pub communication_volume: i64,
    /// In `-1.0..=1.0`.
    pub sentiment_score: f64,
    /// `1` if an AI suggestion was used, else `0`.
    pub ai_suggestion_used: i64,
    /// In `0.0..=1.0`.
    pub ai_acceptance_rate: f64,
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self {
            task_type: "Bug".to_string(),
            assignee_role: "Developer".to_string(),
            experience_years: 0,
            team_size: 1,
            sprint_length_days: 14,
            story_points: 5,
            estimated_hours: 16,
            dependencies_count: 1,
            blockers_count: 0,
            priority_moscow: "Must".to_string(),
            requirement_changes: 0,
            communication_volume: 40,
            sentiment_score: 0.2,
            ai_suggestion_used: 1,
            ai_acceptance_rate: 0.7,
        }
    }
}

/// Sends the form to the predictor. Standalone: reads nothing, writes nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictSuccess {
    /// The submitted form.
    pub form: PredictionForm,
}

impl PredictSuccess {
    /// Creates the stage for a form.
    #[must_use]
    pub fn new(form: PredictionForm) -> Self {
        Self { form }
    }
}

impl Stage for PredictSuccess {
    fn id(&self) -> StageId {
        StageId::Fr05
    }

    fn build_request(&self, _upstream: Option<&StageOutput>) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(&self.form)?)
    }
}
