//! Sample backend responses for pipeline testing.
//!
//! Shapes follow what the backend returns; only the fields a test might
//! inspect are filled in.

use serde_json::{json, Value};

/// A goal parse as returned by `/fr01/parse`.
#[must_use]
pub fn goal_parse(goal_text: &str) -> Value {
    json!({
        "goal_id": "GOAL-20260101120000",
        "original_goal": goal_text,
        "domain": "web",
        "constraints": {"time_days": 56, "budget_usd": 500, "platform": "web"},
        "keywords": ["sprint", "planning"]
    })
}

/// A decomposition as returned by `/fr02/decompose`.
#[must_use]
pub fn decomposition(goal_text: &str) -> Value {
    json!({
        "decomposition_id": "DEC-20260101120100",
        "source_goal_id": "GOAL-20260101120000",
        "original_goal": goal_text,
        "epic": "Web Platform",
        "tasks": [
            {"task_id": "T-001", "title": "Set up repository", "estimate_days": 1, "depends_on": []},
            {"task_id": "T-002", "title": "Design database schema", "estimate_days": 3, "depends_on": ["Set up repository"]},
            {"task_id": "T-003", "title": "Build planning UI", "estimate_days": 8, "depends_on": ["Design database schema"]}
        ]
    })
}

/// A sprint plan as returned by `/fr03/plan`.
#[must_use]
pub fn sprint_plan(goal_text: &str) -> Value {
    json!({
        "sprint_plan_id": "PLAN-20260101120200",
        "original_goal": goal_text,
        "assumptions": {"sprint_length_days": 14, "velocity_days_per_sprint": 14},
        "summary": {"num_sprints": 2, "total_estimated_days": 12},
        "sprints": [
            {
                "sprint_id": "SPRINT-01",
                "used_days": 4,
                "tasks": [
                    {"title": "Set up repository", "estimate_days": 1},
                    {"title": "Design database schema", "estimate_days": 3}
                ]
            },
            {
                "sprint_id": "SPRINT-02",
                "used_days": 8,
                "tasks": [{"title": "Build planning UI", "estimate_days": 8}]
            }
        ]
    })
}

/// A suggestion as returned by `/fr04/suggest`.
#[must_use]
pub fn suggestion() -> Value {
    json!({
        "title": "Build planning UI with drag and drop",
        "estimate_days": 6,
        "depends_on": ["Design database schema"],
        "sprint_hint": "SPRINT-02",
        "note": "Split the UI work to fit the sprint."
    })
}

/// A prediction as returned by `/fr05/predict`.
#[must_use]
pub fn prediction() -> Value {
    json!({
        "prediction": 1,
        "success_probability": 0.81,
        "threshold": 0.5
    })
}
