//! The record of a successful stage run.

use super::{StageId, StoreKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The result of one successful stage run.
///
/// Holds the parsed response for display. It lives only as long as the caller
/// keeps it; the copy that downstream stages read is the one in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRun {
    /// The stage that ran.
    pub stage: StageId,
    /// Unique id of this run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the run in milliseconds.
    pub duration_ms: f64,
    /// The parsed response body.
    pub response: serde_json::Value,
    /// Store key the response was persisted under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persisted_as: Option<StoreKey>,
}

impl StageRun {
    /// Returns true if the response was written to the store.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.persisted_as.is_some()
    }

    /// Returns true if the backend answered with a non-JSON body.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.response
            .as_object()
            .is_some_and(|obj| obj.len() == 1 && obj.get("raw").is_some_and(serde_json::Value::is_string))
    }

    /// Pretty-printed response, as shown to the operator.
    #[must_use]
    pub fn pretty_response(&self) -> String {
        serde_json::to_string_pretty(&self.response).unwrap_or_else(|_| self.response.to_string())
    }
}
