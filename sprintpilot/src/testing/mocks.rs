//! Mock transports for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::errors::TransportError;
use crate::transport::Transport;

/// A request observed by a mock transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// `POST` or `GET`.
    pub method: &'static str,
    /// Endpoint path.
    pub path: String,
    /// Request body, for POSTs.
    pub payload: Option<Value>,
}

/// A transport that replies from per-path scripts and records every call.
///
/// Paths without a script answer with the fallback response, which defaults
/// to `{}`.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<String, VecDeque<Result<Value, TransportError>>>>,
    fallback: Mutex<Option<Result<Value, TransportError>>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
}

impl ScriptedTransport {
    /// Creates a transport with no scripts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that sleeps before every reply.
    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Queues a reply for `path`. Replies are consumed in order.
    pub fn reply(&self, path: impl Into<String>, response: Result<Value, TransportError>) -> &Self {
        self.scripts
            .lock()
            .entry(path.into())
            .or_default()
            .push_back(response);
        self
    }

    /// Queues a successful reply for `path`.
    pub fn reply_ok(&self, path: impl Into<String>, body: Value) -> &Self {
        self.reply(path, Ok(body))
    }

    /// Sets the reply for unscripted paths.
    pub fn set_fallback(&self, response: Result<Value, TransportError>) {
        *self.fallback.lock() = Some(response);
    }

    /// Returns every recorded call.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Returns the number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns the payloads POSTed to `path`, in order.
    #[must_use]
    pub fn payloads_for(&self, path: &str) -> Vec<Value> {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.path == path)
            .filter_map(|call| call.payload.clone())
            .collect()
    }

    /// Resets call tracking.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }

    async fn respond(&self, method: &'static str, path: &str, payload: Option<Value>) -> Result<Value, TransportError> {
        self.calls.lock().push(RecordedCall {
            method,
            path: path.to_string(),
            payload,
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self
            .scripts
            .lock()
            .get_mut(path)
            .and_then(VecDeque::pop_front);
        scripted.unwrap_or_else(|| {
            self.fallback
                .lock()
                .clone()
                .unwrap_or_else(|| Ok(Value::Object(serde_json::Map::new())))
        })
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, path: &str, payload: &Value) -> Result<Value, TransportError> {
        self.respond("POST", path, Some(payload.clone())).await
    }

    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        self.respond("GET", path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_scripts_are_consumed_in_order() {
        let transport = ScriptedTransport::new();
        transport
            .reply_ok("/fr01/parse", json!({"n": 1}))
            .reply_ok("/fr01/parse", json!({"n": 2}));

        assert_eq!(transport.send("/fr01/parse", &json!({})).await.unwrap(), json!({"n": 1}));
        assert_eq!(transport.send("/fr01/parse", &json!({})).await.unwrap(), json!({"n": 2}));
        assert_eq!(transport.send("/fr01/parse", &json!({})).await.unwrap(), json!({}));
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_fallback_and_recording() {
        let transport = ScriptedTransport::new();
        transport.set_fallback(Err(TransportError::status(503, "down")));

        let err = transport.get("/health").await.unwrap_err();
        assert_eq!(err.to_string(), "down");

        let calls = transport.calls();
        assert_eq!(calls[0].method, "GET");
        assert_eq!(calls[0].payload, None);
    }
}
