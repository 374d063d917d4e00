//! Error types for the sprintpilot client.
//!
//! Three paths stay distinct on purpose: a [`GateError`] is raised before any
//! request is issued, a [`TransportError`] comes back from the wire, and a
//! body that is not JSON is not an error at all (it is wrapped as
//! `{"raw": ...}` by the transport).

use crate::core::{StageId, StoreKey};
use std::collections::HashMap;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = SprintPilotError> = std::result::Result<T, E>;

/// The main error type for sprintpilot operations.
#[derive(Debug, Error)]
pub enum SprintPilotError {
    /// A required upstream stage output was missing.
    #[error("{0}")]
    Gate(#[from] GateError),

    /// The request failed on the network or with a non-success status.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// The stage already has a request outstanding.
    #[error("{stage} is already running")]
    StageBusy {
        /// The stage that was re-triggered.
        stage: StageId,
    },

    /// The stage store could not be read or written.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// The client configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SprintPilotError {
    /// Returns true if this error was raised before any network call.
    #[must_use]
    pub fn is_gate(&self) -> bool {
        matches!(self, Self::Gate(_))
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        let kind = match self {
            Self::Gate(err) => {
                map.insert("stage".to_string(), serde_json::json!(err.stage));
                map.insert("missing".to_string(), serde_json::json!(err.missing));
                "GateError"
            }
            Self::Transport(err) => {
                if let Some(status) = err.status_code() {
                    map.insert("status".to_string(), serde_json::json!(status));
                }
                "TransportError"
            }
            Self::StageBusy { stage } => {
                map.insert("stage".to_string(), serde_json::json!(stage));
                "StageBusy"
            }
            Self::Store(_) => "StoreError",
            Self::Config(_) => "ConfigError",
            Self::Serialization(_) => "SerializationError",
        };
        map.insert("type".to_string(), serde_json::json!(kind));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

impl From<serde_json::Error> for SprintPilotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Error raised when a stage's upstream output is absent from the store.
///
/// The message is fixed per stage and shown to the operator verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GateError {
    /// The stage that refused to run.
    pub stage: StageId,
    /// The store key that was absent.
    pub missing: StoreKey,
    /// The operator-facing message.
    pub message: String,
}

impl GateError {
    /// Creates a gate error for the given stage and missing key.
    #[must_use]
    pub fn new(stage: StageId, missing: StoreKey, message: impl Into<String>) -> Self {
        Self {
            stage,
            missing,
            message: message.into(),
        }
    }
}

/// Errors raised while talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the body, or the synthesized fallback.
        message: String,
    },

    /// The request never produced a response.
    #[error("{0}")]
    Network(String),
}

impl TransportError {
    /// Creates a status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error from the underlying message.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Returns the HTTP status, if the backend answered.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Errors raised by persistent stage stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Store IO error at {path}: {source}")]
    Io {
        /// The backing file path.
        path: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not hold a JSON object.
    #[error("Store file {path} is corrupt: {reason}")]
    Corrupt {
        /// The backing file path.
        path: String,
        /// What was wrong with it.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_error_displays_message_verbatim() {
        let err = GateError::new(
            StageId::Fr02,
            StoreKey::Fr01Out,
            "No FR01 output found. Run FR01 first.",
        );
        assert_eq!(err.to_string(), "No FR01 output found. Run FR01 first.");

        let wrapped = SprintPilotError::from(err);
        assert!(wrapped.is_gate());
        assert_eq!(wrapped.to_string(), "No FR01 output found. Run FR01 first.");
    }

    #[test]
    fn test_transport_error_displays_message_only() {
        let err = TransportError::status(422, "bad field");
        assert_eq!(err.to_string(), "bad field");
        assert_eq!(err.status_code(), Some(422));

        let net = TransportError::network("connection refused");
        assert_eq!(net.to_string(), "connection refused");
        assert_eq!(net.status_code(), None);
    }

    #[test]
    fn test_error_to_dict() {
        let err = SprintPilotError::from(TransportError::status(500, "Request failed (500)"));
        let dict = err.to_dict();

        assert_eq!(dict.get("type").unwrap(), "TransportError");
        assert_eq!(dict.get("status").unwrap(), 500);
        assert_eq!(dict.get("message").unwrap(), "Request failed (500)");
    }

    #[test]
    fn test_stage_busy_message() {
        let err = SprintPilotError::StageBusy { stage: StageId::Fr03 };
        assert_eq!(err.to_string(), "FR03 is already running");
    }
}
