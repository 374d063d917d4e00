//! Narrow typed view over the sprint planner's output.
//!
//! Only the fields FR04 depends on are modelled; everything else in the plan
//! stays opaque JSON.

use serde::Deserialize;

/// A task as seen by the suggester.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlannedTask {
    /// Task title. Tasks without a string title are ignored.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
}

/// A sprint as seen by the suggester.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlannedSprint {
    /// Tasks in stored order.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub tasks: Vec<PlannedTask>,
}

/// The parts of an `FR03_OUT` plan the client actually reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SprintPlanView {
    /// The goal the plan was built for; empty when absent.
    #[serde(default, deserialize_with = "lenient_string")]
    pub original_goal: Option<String>,
    /// Sprints in stored order.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub sprints: Vec<PlannedSprint>,
}

impl SprintPlanView {
    /// Reads the view out of a stored plan.
    ///
    /// Never fails: a plan that does not match the expected shape yields an
    /// empty goal and no titles.
    #[must_use]
    pub fn from_value(plan: &serde_json::Value) -> Self {
        Self::deserialize(plan).unwrap_or_default()
    }

    /// The plan's goal, or `""`.
    #[must_use]
    pub fn goal(&self) -> &str {
        self.original_goal.as_deref().unwrap_or_default()
    }

    /// All task titles, sprint by sprint, in stored order. Duplicates are kept.
    ///
    /// Only string titles are returned, so for a malformed plan the list can
    /// be shorter than the number of tasks.
    #[must_use]
    pub fn task_titles(&self) -> Vec<String> {
        self.sprints
            .iter()
            .flat_map(|sprint| sprint.tasks.iter())
            .filter_map(|task| task.title.clone())
            .collect()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_titles_keep_order_and_duplicates() {
        let plan = json!({
            "sprints": [
                {"tasks": [{"title": "A"}]},
                {"tasks": [{"title": "B"}, {"title": "A"}]}
            ]
        });

        let view = SprintPlanView::from_value(&plan);
        assert_eq!(view.task_titles(), vec!["A", "B", "A"]);
    }

    #[test]
    fn test_goal_defaults_to_empty() {
        let view = SprintPlanView::from_value(&json!({"sprints": []}));
        assert_eq!(view.goal(), "");

        let view = SprintPlanView::from_value(&json!({"original_goal": "Build X"}));
        assert_eq!(view.goal(), "Build X");
        assert!(view.task_titles().is_empty());
    }

    #[test]
    fn test_missing_tasks_and_titles_are_skipped() {
        let plan = json!({
            "original_goal": "Build X",
            "sprints": [
                {"sprint_id": "SPRINT-01"},
                {"tasks": [{"title": "Design"}, {"estimate_days": 2}, {"title": 7}]},
                "not a sprint",
                {"tasks": [{"title": "Ship", "depends_on": ["Design"]}]}
            ]
        });

        let view = SprintPlanView::from_value(&plan);
        // Four tasks, two titles: untitled and non-string entries are not
        // forwarded as null or numbers, since the suggester takes `string[]`.
        let task_count: usize = view.sprints.iter().map(|sprint| sprint.tasks.len()).sum();
        assert_eq!(task_count, 4);
        assert_eq!(view.task_titles(), vec!["Design", "Ship"]);
    }

    #[test]
    fn test_non_object_plan_yields_empty_view() {
        let view = SprintPlanView::from_value(&json!({"raw": "OK"}));
        assert_eq!(view.goal(), "");
        assert!(view.task_titles().is_empty());

        let view = SprintPlanView::from_value(&json!([1, 2, 3]));
        assert!(view.task_titles().is_empty());
    }
}
