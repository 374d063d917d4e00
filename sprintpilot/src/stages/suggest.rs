//! FR04: ask for a suggested change to one task of the plan.

use serde::Serialize;

use super::{require_upstream, Stage};
use crate::core::{SprintPlanView, StageId, StageOutput};
use crate::errors::Result;

/// Splits a comma-separated dependency list.
///
/// Pieces are trimmed and empty pieces dropped; order is kept.
#[must_use]
pub fn parse_dependencies(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// The task being edited and what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestTaskChange {
    /// Action identifier understood by the backend, e.g. `modify_task`.
    pub action: String,
    /// Title of the task being edited.
    pub current_title: String,
    /// Current estimate in days.
    pub current_est: i64,
    /// Comma-separated titles of the task's dependencies.
    pub current_deps: String,
}

impl Default for SuggestTaskChange {
    fn default() -> Self {
        Self {
            action: "modify_task".to_string(),
            current_title: String::new(),
            current_est: 3,
            current_deps: String::new(),
        }
    }
}

#[derive(Serialize)]
struct SuggestRequest<'a> {
    goal: &'a str,
    existing_task_titles: Vec<String>,
    action: &'a str,
    current_title: &'a str,
    current_est: i64,
    current_deps: Vec<String>,
}

impl Stage for SuggestTaskChange {
    fn id(&self) -> StageId {
        StageId::Fr04
    }

    fn build_request(&self, upstream: Option<&StageOutput>) -> Result<serde_json::Value> {
        let plan = SprintPlanView::from_value(require_upstream(self.id(), upstream)?);
        Ok(serde_json::to_value(SuggestRequest {
            goal: plan.goal(),
            existing_task_titles: plan.task_titles(),
            action: &self.action,
            current_title: &self.current_title,
            current_est: self.current_est,
            current_deps: parse_dependencies(&self.current_deps),
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_dependencies() {
        assert_eq!(parse_dependencies(" a, b ,,c "), vec!["a", "b", "c"]);
        assert!(parse_dependencies("").is_empty());
        assert!(parse_dependencies("   ").is_empty());
        assert!(parse_dependencies(" , ,").is_empty());
        assert_eq!(parse_dependencies("Design,Design"), vec!["Design", "Design"]);
    }

    #[test]
    fn test_request_derives_goal_and_titles() {
        let plan = json!({
            "original_goal": "Build X",
            "sprints": [
                {"tasks": [{"title": "A"}]},
                {"tasks": [{"title": "B"}, {"title": "A"}]}
            ]
        });
        let stage = SuggestTaskChange {
            current_title: "B".to_string(),
            current_deps: "A, ".to_string(),
            ..SuggestTaskChange::default()
        };

        let body = stage.build_request(Some(&plan)).unwrap();
        assert_eq!(
            body,
            json!({
                "goal": "Build X",
                "existing_task_titles": ["A", "B", "A"],
                "action": "modify_task",
                "current_title": "B",
                "current_est": 3,
                "current_deps": ["A"]
            })
        );
    }

    #[test]
    fn test_missing_plan_is_gated() {
        let err = SuggestTaskChange::default().build_request(None).unwrap_err();
        assert_eq!(err.to_string(), "No FR03 plan found. Run FR03 first.");
    }
}
