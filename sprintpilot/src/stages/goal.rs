//! FR01: parse a free-text project goal.

use super::Stage;
use crate::core::{StageId, StageOutput};
use crate::errors::Result;

/// Goal text offered when the operator gives none.
pub const DEFAULT_GOAL_TEXT: &str =
    "Build a web application for sprint planning within 8 weeks under $500 for a small team.";

/// Sends the goal text to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGoal {
    /// The free-text goal.
    pub goal_text: String,
}

impl ParseGoal {
    /// Creates the stage for a goal.
    #[must_use]
    pub fn new(goal_text: impl Into<String>) -> Self {
        Self {
            goal_text: goal_text.into(),
        }
    }
}

impl Default for ParseGoal {
    fn default() -> Self {
        Self::new(DEFAULT_GOAL_TEXT)
    }
}

impl Stage for ParseGoal {
    fn id(&self) -> StageId {
        StageId::Fr01
    }

    fn build_request(&self, _upstream: Option<&StageOutput>) -> Result<serde_json::Value> {
        Ok(serde_json::json!({ "goal_text": self.goal_text }))
    }
}
