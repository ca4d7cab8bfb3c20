//! Decoded API response envelope

use serde_json::Value;
use std::fmt;

/// Error type marker the service uses for rejected tokens.
pub const OAUTH_EXCEPTION: &str = "OAuthException";

/// Decoded JSON payload of an API call.
///
/// Transport and decode failures are folded into the same shape via
/// [`ApiResponse::from_failure`], so callers always receive a value and
/// inspect [`ApiResponse::error`] to tell success from failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    data: Value,
}

impl ApiResponse {
    /// Wraps a decoded payload.
    #[must_use]
    pub const fn new(data: Value) -> Self {
        Self { data }
    }

    /// Synthesizes the error shape for a failure that produced no decodable
    /// body.
    #[must_use]
    pub fn from_failure(description: impl fmt::Display) -> Self {
        Self {
            data: serde_json::json!({ "error": description.to_string() }),
        }
    }

    /// The raw decoded payload.
    #[must_use]
    pub const fn data(&self) -> &Value {
        &self.data
    }

    /// Consumes the response, returning the payload.
    #[must_use]
    pub fn into_data(self) -> Value {
        self.data
    }

    /// Parses the `error` marker, if the payload carries one.
    ///
    /// The service emits either a bare string or an object with `type` and
    /// `message` fields; both forms normalize into [`ApiError`].
    #[must_use]
    pub fn error(&self) -> Option<ApiError> {
        match self.data.get("error")? {
            Value::String(message) => Some(ApiError {
                kind: None,
                message: message.clone(),
            }),
            Value::Object(fields) => {
                let kind = fields.get("type").and_then(Value::as_str).map(str::to_owned);
                let message = fields
                    .get("message")
                    .and_then(Value::as_str)
                    .map_or_else(|| Value::Object(fields.clone()).to_string(), str::to_owned);
                Some(ApiError { kind, message })
            }
            other => Some(ApiError {
                kind: None,
                message: other.to_string(),
            }),
        }
    }

    /// Returns true when the error marker declares a rejected token.
    #[must_use]
    pub fn is_authorization_exception(&self) -> bool {
        self.error()
            .is_some_and(|error| error.is_authorization_exception())
    }
}

/// Parsed view of the `error` marker in an API payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Declared error type, when the object form carries one.
    pub kind: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl ApiError {
    /// Returns true when the declared type is [`OAUTH_EXCEPTION`].
    #[must_use]
    pub fn is_authorization_exception(&self) -> bool {
        self.kind.as_deref() == Some(OAUTH_EXCEPTION)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Some(kind) => write!(f, "{kind}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_clean_payload_has_no_error() {
        let response = ApiResponse::new(json!({"id": "profile-1", "name": "Jane"}));
        assert!(response.error().is_none());
        assert!(!response.is_authorization_exception());
    }

    #[test]
    fn test_string_error_form() {
        let response = ApiResponse::new(json!({"error": "Rate limit exceeded"}));
        let error = response.error().unwrap();
        assert_eq!(error.kind, None);
        assert_eq!(error.message, "Rate limit exceeded");
        assert!(!response.is_authorization_exception());
    }

    #[test]
    fn test_object_error_form() {
        let response = ApiResponse::new(json!({
            "error": {"type": "OAuthException", "message": "Invalid access token"}
        }));
        let error = response.error().unwrap();
        assert_eq!(error.kind.as_deref(), Some(OAUTH_EXCEPTION));
        assert_eq!(error.message, "Invalid access token");
        assert!(response.is_authorization_exception());
        assert_eq!(error.to_string(), "OAuthException: Invalid access token");
    }

    #[test]
    fn test_object_error_without_message_stringifies() {
        let response = ApiResponse::new(json!({"error": {"code": 401}}));
        let error = response.error().unwrap();
        assert_eq!(error.kind, None);
        assert_eq!(error.message, r#"{"code":401}"#);
    }

    #[test]
    fn test_unusual_error_values_still_count() {
        let response = ApiResponse::new(json!({"error": 503}));
        assert_eq!(response.error().unwrap().message, "503");

        let response = ApiResponse::new(json!({"error": null}));
        assert!(response.error().is_some());
    }

    #[test]
    fn test_from_failure_shape() {
        let response = ApiResponse::from_failure("connection refused");
        assert_eq!(response.data(), &json!({"error": "connection refused"}));
        let error = response.error().unwrap();
        assert_eq!(error.message, "connection refused");
        assert!(!response.is_authorization_exception());
    }
}
