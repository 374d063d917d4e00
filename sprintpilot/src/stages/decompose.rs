//! FR02: decompose the parsed goal into tasks.

use super::{require_upstream, Stage};
use crate::core::{StageId, StageOutput};
use crate::errors::Result;

/// Forwards the stored goal parse to the decomposer. Takes no local input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecomposeTasks;

impl Stage for DecomposeTasks {
    fn id(&self) -> StageId {
        StageId::Fr02
    }

    fn build_request(&self, upstream: Option<&StageOutput>) -> Result<serde_json::Value> {
        let fr01 = require_upstream(self.id(), upstream)?;
        Ok(serde_json::json!({ "data": fr01 }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wraps_upstream_as_data() {
        let fr01 = json!({"goal_id": "G-1", "domain": "web"});
        let body = DecomposeTasks.build_request(Some(&fr01)).unwrap();
        assert_eq!(body, json!({"data": {"goal_id": "G-1", "domain": "web"}}));
    }

    #[test]
    fn test_missing_upstream_is_gated() {
        let err = DecomposeTasks.build_request(None).unwrap_err();
        assert_eq!(err.to_string(), "No FR01 output found. Run FR01 first.");
    }
}
