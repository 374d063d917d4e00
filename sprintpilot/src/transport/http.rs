//! reqwest-backed transport.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

use super::{body, Transport};
use crate::config::ClientConfig;
use crate::errors::{Result, SprintPilotError, TransportError};

/// Talks JSON over HTTP to the configured backend.
///
/// One attempt per call; no timeout and no retries are configured.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Creates a transport for the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| SprintPilotError::Config(format!("invalid header name '{key}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| SprintPilotError::Config(format!("invalid header value for '{key}': {e}")))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| SprintPilotError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn finish(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> std::result::Result<Value, TransportError> {
        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!(
            url = %url,
            status,
            bytes = text.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Backend responded"
        );

        body::interpret(status, &text)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, path: &str, payload: &Value) -> std::result::Result<Value, TransportError> {
        let url = self.config.endpoint_url(path);
        debug!(url = %url, "POST");
        self.finish(self.client.post(&url).json(payload), &url).await
    }

    async fn get(&self, path: &str) -> std::result::Result<Value, TransportError> {
        let url = self.config.endpoint_url(path);
        debug!(url = %url, "GET");
        self.finish(self.client.get(&url), &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn transport_for(server: &MockServer) -> HttpTransport {
        HttpTransport::new(ClientConfig::default().with_api_base(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_posts_json_and_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/fr01/parse"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"goal_text": "Build X"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"goal_id": "G-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport_for(&server).await;
        let out = transport.send("/fr01/parse", &json!({"goal_text": "Build X"})).await.unwrap();
        assert_eq!(out, json!({"goal_id": "G-1"}));
    }

    #[tokio::test]
    async fn test_status_error_uses_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({"detail": "bad field"})))
            .mount(&server)
            .await;

        let transport = transport_for(&server).await;
        let err = transport.send("/fr05/predict", &json!({})).await.unwrap_err();
        assert_eq!(err, TransportError::status(422, "bad field"));
    }

    #[tokio::test]
    async fn test_empty_500_synthesizes_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let transport = transport_for(&server).await;
        let err = transport.send("/fr02/decompose", &json!({"data": {}})).await.unwrap_err();
        assert_eq!(err.to_string(), "Request failed (500)");
    }

    #[tokio::test]
    async fn test_plain_text_success_is_wrapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .mount(&server)
            .await;

        let transport = transport_for(&server).await;
        let out = transport.send("/fr01/parse", &json!({})).await.unwrap();
        assert_eq!(out, json!({"raw": "OK"}));
    }

    #[tokio::test]
    async fn test_get_health() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let transport = transport_for(&server).await;
        assert_eq!(transport.get("/health").await.unwrap(), json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_custom_headers_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-team", "blue"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::default()
            .with_api_base(server.uri())
            .with_header("x-team", "blue");
        let transport = HttpTransport::new(config).unwrap();
        transport.send("/fr05/predict", &json!({})).await.unwrap();
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        // Nothing listens on port 9 on the loopback interface in test environments.
        let config = ClientConfig::default().with_api_base("http://127.0.0.1:9");
        let transport = HttpTransport::new(config).unwrap();

        let err = transport.send("/fr01/parse", &json!({})).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
        assert!(!err.to_string().is_empty());
    }
}
