//! API-specific error types

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// REST API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 or 403 from the backend
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Other 4xx, or an unintelligible response body
    #[error("Client error: {0}")]
    Client(String),

    /// 5xx from the backend
    #[error("Server error: {0}")]
    Server(String),

    /// Transport failure before a status was received
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request exceeded the configured timeout
    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    /// Map a non-success status and raw body to the matching error variant.
    ///
    /// Prefers the server's own message from an `{"error": ...}` or
    /// `{"message": ...}` JSON body over a generic status description.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_server_message(body)
            .unwrap_or_else(|| format!("Request failed with status {status}"));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth(message),
            s if s.is_server_error() => Self::Server(message),
            _ => Self::Client(message),
        }
    }
}

/// Pull the human-readable message out of a backend error body.
fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("error").or_else(|| value.get("message"))?.as_str()?;
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_error_key_from_body() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"error": "Invalid authorization code"}"#,
        );
        assert!(matches!(err, ApiError::Client(m) if m == "Invalid authorization code"));
    }

    #[test]
    fn falls_back_to_message_key() {
        let err =
            ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"message": "bad input"}"#);
        assert!(matches!(err, ApiError::Client(m) if m == "bad input"));
    }

    #[test]
    fn non_json_body_yields_generic_message() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert!(matches!(err, ApiError::Server(m) if m.contains("500")));
    }

    #[test]
    fn auth_statuses_map_to_auth_variant() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Auth(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, r#"{"error": "Insufficient role"}"#),
            ApiError::Auth(m) if m == "Insufficient role"
        ));
    }
}
