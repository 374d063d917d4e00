//! Response body interpretation shared by every transport.

use crate::core::is_truthy;
use crate::errors::TransportError;
use serde_json::Value;

/// Parses a response body.
///
/// An empty body reads as `{}`. A body that is not JSON is kept as
/// `{"raw": <text>}` instead of being rejected.
#[must_use]
pub fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Object(serde_json::Map::new());
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "raw": text }))
}

/// Builds the operator-facing message for a failed response.
///
/// Uses `detail`, then `message`, skipping values that are falsy in the
/// JavaScript sense. Non-string values are rendered as compact JSON.
#[must_use]
pub fn error_message(status: u16, body: &Value) -> String {
    let picked = ["detail", "message"]
        .iter()
        .filter_map(|field| body.get(field))
        .find(|value| is_truthy(value));

    match picked {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => format!("Request failed ({status})"),
    }
}

/// Turns a status and raw body into the transport result.
pub fn interpret(status: u16, text: &str) -> Result<Value, TransportError> {
    let body = parse_body(text);
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(TransportError::status(status, error_message(status, &body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_body_variants() {
        assert_eq!(parse_body(""), json!({}));
        assert_eq!(parse_body(r#"{"a": 1}"#), json!({"a": 1}));
        assert_eq!(parse_body("[1,2]"), json!([1, 2]));
        assert_eq!(parse_body("OK"), json!({"raw": "OK"}));
        assert_eq!(parse_body("  "), json!({"raw": "  "}));
    }

    #[test]
    fn test_string_detail_is_used_verbatim() {
        assert_eq!(interpret(422, r#"{"detail":"bad field"}"#), Err(TransportError::status(422, "bad field")));
    }

    #[test]
    fn test_empty_body_falls_back_to_status() {
        let err = interpret(500, "").unwrap_err();
        assert_eq!(err.to_string(), "Request failed (500)");
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn test_object_detail_is_stringified() {
        let err = interpret(422, r#"{"detail":{"field":"x"}}"#).unwrap_err();
        assert_eq!(err.to_string(), r#"{"field":"x"}"#);
    }

    #[test]
    fn test_message_used_when_detail_missing_or_falsy() {
        assert_eq!(error_message(400, &json!({"message": "nope"})), "nope");
        assert_eq!(error_message(400, &json!({"detail": "", "message": "nope"})), "nope");
        assert_eq!(error_message(400, &json!({"detail": null, "message": 0})), "Request failed (400)");
        assert_eq!(error_message(400, &json!({"detail": [{"loc": ["body"]}]})), r#"[{"loc":["body"]}]"#);
        assert_eq!(error_message(404, &json!({"raw": "Not Found"})), "Request failed (404)");
        assert_eq!(error_message(503, &json!(["detail"])), "Request failed (503)");
    }

    #[test]
    fn test_non_json_success_is_wrapped() {
        assert_eq!(interpret(200, "OK"), Ok(json!({"raw": "OK"})));
        assert_eq!(interpret(204, ""), Ok(json!({})));
    }
}
