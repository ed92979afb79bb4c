//! Error types for the category API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError`. Both carry the
//! server's error body classified as an `ErrorPayload`, so reading a message
//! out of it is a match instead of optional-field probing.
//! `TransportError` means no response was obtained at all.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Field names probed, in order, for a human-readable message in a JSON
/// error body.
const MESSAGE_FIELDS: [&str; 4] = ["message", "detail", "title", "error"];

/// Server-provided error body attached to a response error.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// The response carried no body.
    Empty,
    /// The body parsed as JSON.
    Structured(Value),
    /// The body was not JSON; kept verbatim (trimmed).
    Text(String),
}

impl ErrorPayload {
    pub fn from_body(body: &str) -> Self {
        let body = body.trim();
        if body.is_empty() {
            return ErrorPayload::Empty;
        }
        match serde_json::from_str(body) {
            Ok(value) => ErrorPayload::Structured(value),
            Err(_) => ErrorPayload::Text(body.to_string()),
        }
    }

    /// Best human-readable message in the payload, if it has one.
    pub fn message(&self) -> Option<String> {
        match self {
            ErrorPayload::Empty => None,
            ErrorPayload::Text(text) => Some(text.clone()),
            ErrorPayload::Structured(value) => Some(structured_message(value)),
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Empty => Ok(()),
            ErrorPayload::Structured(value) => write!(f, "{value}"),
            ErrorPayload::Text(text) => f.write_str(text),
        }
    }
}

fn structured_message(value: &Value) -> String {
    if let Some(text) = value.as_str() {
        return text.to_string();
    }
    MESSAGE_FIELDS
        .iter()
        .find_map(|field| value.get(field).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

/// Errors returned by the codec, transports and `CategoryClient`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The server returned 404; the requested category does not exist.
    #[error("resource not found")]
    NotFound { payload: ErrorPayload },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {payload}")]
    HttpError { status: u16, payload: ErrorPayload },

    /// No response was obtained (unreachable host, timeout, reset).
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// HTTP status of the response that caused this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            ApiError::NotFound { payload } | ApiError::HttpError { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// The server's own message when the payload has one, otherwise this
    /// error's display text.
    pub fn best_message(&self) -> String {
        self.payload()
            .and_then(ErrorPayload::message)
            .unwrap_or_else(|| self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_body_is_empty_payload() {
        assert_eq!(ErrorPayload::from_body("  \n"), ErrorPayload::Empty);
        assert_eq!(ErrorPayload::Empty.message(), None);
    }

    #[test]
    fn non_json_body_is_text_payload() {
        let payload = ErrorPayload::from_body("Bad Gateway\n");
        assert_eq!(payload, ErrorPayload::Text("Bad Gateway".to_string()));
        assert_eq!(payload.message().as_deref(), Some("Bad Gateway"));
    }

    #[test]
    fn message_field_wins() {
        let payload = ErrorPayload::from_body(r#"{"title":"Bad Request","message":"Name is required."}"#);
        assert_eq!(payload.message().as_deref(), Some("Name is required."));
    }

    #[test]
    fn problem_details_fall_back_to_detail_then_title() {
        let payload = ErrorPayload::Structured(json!({"title": "Conflict", "detail": "Name taken."}));
        assert_eq!(payload.message().as_deref(), Some("Name taken."));

        let payload = ErrorPayload::Structured(json!({"title": "Conflict", "status": 409}));
        assert_eq!(payload.message().as_deref(), Some("Conflict"));
    }

    #[test]
    fn structured_without_known_field_uses_compact_json() {
        let payload = ErrorPayload::Structured(json!({"errors": {"Name": ["required"]}}));
        assert_eq!(payload.message().as_deref(), Some(r#"{"errors":{"Name":["required"]}}"#));
    }

    #[test]
    fn json_string_body_is_its_own_message() {
        let payload = ErrorPayload::from_body(r#""Category is in use""#);
        assert_eq!(payload.message().as_deref(), Some("Category is in use"));
    }

    #[test]
    fn best_message_prefers_payload() {
        let err = ApiError::HttpError {
            status: 400,
            payload: ErrorPayload::from_body(r#"{"message":"Name is required."}"#),
        };
        assert_eq!(err.best_message(), "Name is required.");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn best_message_falls_back_to_display() {
        let err = ApiError::NotFound {
            payload: ErrorPayload::Empty,
        };
        assert_eq!(err.best_message(), "resource not found");
        assert_eq!(err.status(), Some(404));

        let err = ApiError::TransportError("connection refused".to_string());
        assert_eq!(err.best_message(), "transport failed: connection refused");
        assert_eq!(err.status(), None);
        assert!(err.payload().is_none());
    }
}
