//! Transport: the single request/response seam to the backend.
//!
//! A transport serializes the payload, issues the request once, and
//! normalizes the outcome:
//! - 2xx: the parsed body, passed through untyped
//! - non-2xx: a [`TransportError`] carrying the extracted message
//! - non-JSON body: `{"raw": <text>}`, on either path

mod body;
mod http;

pub use body::{error_message, interpret, parse_body};
pub use http::HttpTransport;

use crate::errors::TransportError;
use async_trait::async_trait;
use serde_json::Value;

/// Protocol for sending stage requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `payload` as JSON to `path` and returns the parsed response.
    async fn send(&self, path: &str, payload: &Value) -> Result<Value, TransportError>;

    /// GETs `path` and returns the parsed response.
    async fn get(&self, path: &str) -> Result<Value, TransportError>;
}
