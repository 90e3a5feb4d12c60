//! Failure payload normalization.
//!
//! The server reports failures in several shapes:
//!
//! ```text
//! { "error": "Invalid credentials" }
//! { "error": { "message": "Quiz not found" } }
//! { "message": "Validation failed" }
//! ```
//!
//! and transport failures carry no body at all. Everything collapses into a
//! single human-readable string; raw transport text never reaches the caller.

use serde_json::Value;

use crate::api::ApiError;

/// Extract a message from a failure body, probing `error`, `error.message`
/// and `message` in that order. Only string values count.
pub fn message_from_body(body: &Value) -> Option<String> {
    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return Some(error.to_string());
    }
    if let Some(message) = body
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str)
    {
        return Some(message.to_string());
    }
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Produce the user-facing message for a failed call.
///
/// `fallback` names the failed operation, e.g. "Failed to fetch quizzes".
pub fn normalize(error: &ApiError, fallback: &str) -> String {
    let message = match error {
        ApiError::Status {
            body: Some(body), ..
        } => message_from_body(body),
        _ => None,
    };

    match message {
        Some(message) => message,
        None => {
            tracing::debug!(error = %error, fallback, "No structured error message, using fallback");
            fallback.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::HttpError;
    use serde_json::json;

    fn status(body: Value) -> ApiError {
        ApiError::Status {
            status: 400,
            body: Some(body),
        }
    }

    #[test]
    fn test_top_level_error_string() {
        let err = status(json!({"error": "Invalid credentials", "message": "ignored"}));
        assert_eq!(normalize(&err, "Login failed"), "Invalid credentials");
    }

    #[test]
    fn test_nested_error_message() {
        let err = status(json!({"error": {"message": "Quiz not found"}}));
        assert_eq!(normalize(&err, "Failed to fetch quiz"), "Quiz not found");
    }

    #[test]
    fn test_generic_message_field() {
        let err = status(json!({"message": "Validation failed"}));
        assert_eq!(normalize(&err, "Failed to create quiz"), "Validation failed");
    }

    #[test]
    fn test_non_string_fields_fall_back() {
        let err = status(json!({"error": 42, "message": ["a"]}));
        assert_eq!(normalize(&err, "Failed to fetch quizzes"), "Failed to fetch quizzes");

        let err = status(json!({"error": {"message": {"text": "deep"}}}));
        assert_eq!(normalize(&err, "Failed to delete quiz"), "Failed to delete quiz");
    }

    #[test]
    fn test_missing_body_falls_back() {
        let err = ApiError::Status {
            status: 502,
            body: None,
        };
        assert_eq!(normalize(&err, "Failed to fetch questions"), "Failed to fetch questions");
    }

    #[test]
    fn test_transport_error_is_never_surfaced() {
        let err = ApiError::Transport(HttpError::ConnectionFailed(
            "tcp connect error: Connection refused (os error 111)".to_string(),
        ));
        let message = normalize(&err, "Login failed");
        assert_eq!(message, "Login failed");
        assert!(!message.contains("os error"));
    }

    #[test]
    fn test_message_from_body_on_array() {
        assert!(message_from_body(&json!(["error"])).is_none());
    }
}
