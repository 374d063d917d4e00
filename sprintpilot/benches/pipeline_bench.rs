//! Benchmarks for request building.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};
use sprintpilot::core::{SprintPlanView, StageId};
use sprintpilot::stages::{parse_dependencies, Stage, SuggestTaskChange};

fn large_plan(sprints: usize, tasks_per_sprint: usize) -> Value {
    let sprints: Vec<Value> = (0..sprints)
        .map(|s| {
            let tasks: Vec<Value> = (0..tasks_per_sprint)
                .map(|t| json!({"title": format!("Task {s}-{t}"), "estimate_days": 2}))
                .collect();
            json!({"sprint_id": format!("SPRINT-{s:02}"), "tasks": tasks})
        })
        .collect();
    json!({"original_goal": "Build a sprint planner", "sprints": sprints})
}

fn plan_benchmark(c: &mut Criterion) {
    let plan = large_plan(20, 25);

    c.bench_function("task_titles_500", |b| {
        b.iter(|| SprintPlanView::from_value(black_box(&plan)).task_titles());
    });

    let stage = SuggestTaskChange {
        current_title: "Task 3-4".to_string(),
        current_deps: "Task 1-1, Task 2-2, Task 3-3".to_string(),
        ..SuggestTaskChange::default()
    };
    c.bench_function("fr04_build_request", |b| {
        b.iter(|| stage.build_request(Some(black_box(&plan))));
    });
    assert_eq!(stage.id(), StageId::Fr04);
}

fn deps_benchmark(c: &mut Criterion) {
    let input = (0..50).map(|i| format!(" dep {i} ")).collect::<Vec<_>>().join(",,");

    c.bench_function("parse_dependencies_50", |b| {
        b.iter(|| parse_dependencies(black_box(&input)));
    });
}

criterion_group!(benches, plan_benchmark, deps_benchmark);
criterion_main!(benches);
