//! Core domain model types for sprintpilot.
//!
//! This module contains the fundamental types used throughout the client:
//! - Stage identifiers, store keys and the static stage chain
//! - The record of a successful stage run
//! - The typed view over a sprint plan

mod keys;
mod plan;
mod run;

pub use keys::{Gate, StageDescriptor, StageId, StoreKey};
pub use plan::{PlannedSprint, PlannedTask, SprintPlanView};
pub use run::StageRun;

/// An opaque stage output as returned by the backend.
pub type StageOutput = serde_json::Value;

/// JavaScript truthiness of a JSON value.
///
/// `null`, `false`, zero and `""` are falsy; arrays and objects are truthy
/// even when empty. Stored outputs that are falsy read as absent, and error
/// bodies skip falsy `detail`/`message` fields.
#[must_use]
pub fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(-1), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }
}
