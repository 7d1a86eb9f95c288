//! Shared error types including RFC7807 Problem Details.

use serde::{Deserialize, Serialize};

/// RFC7807 Problem Details (application/problem+json)
///
/// The API uses this as its canonical error envelope so clients can
/// surface meaningful auth and validation errors instead of failing to
/// decode a success response type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub type_url: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// A URI reference that identifies the specific occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

/// Attempt to parse an RFC7807 (or RFC7807-ish) JSON body into a user-facing message.
/// Prefers `detail`, falls back to `title`.
pub fn try_problem_detail(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ProblemDetails>(body).ok()?;
    if let Some(detail) = parsed.detail {
        if !detail.trim().is_empty() {
            return Some(detail);
        }
    }
    if !parsed.title.trim().is_empty() {
        return Some(parsed.title);
    }
    None
}

/// API error type for client-side use.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

impl ApiError {
    /// Map an error to the string shown to the user.
    ///
    /// HTTP failures prefer the problem-details message carried in the
    /// body; transport and decode failures fall back to the error's own
    /// rendering.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { body, .. } => {
                try_problem_detail(body).unwrap_or_else(|| self.to_string())
            }
            other => other.to_string(),
        }
    }

    /// Whether this error is an authorization failure (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_detail_prefers_detail_over_title() {
        let body = r#"{"type":"about:blank","title":"Bad Request","status":400,"detail":"Coupon code is expired"}"#;
        assert_eq!(
            try_problem_detail(body),
            Some("Coupon code is expired".to_string())
        );
    }

    #[test]
    fn problem_detail_falls_back_to_title() {
        let body = r#"{"type":"about:blank","title":"Unauthorized","status":401}"#;
        assert_eq!(try_problem_detail(body), Some("Unauthorized".to_string()));
    }

    #[test]
    fn problem_detail_rejects_non_problem_bodies() {
        assert_eq!(try_problem_detail("not json"), None);
        assert_eq!(try_problem_detail(r#"{"message":"nope"}"#), None);
    }

    #[test]
    fn user_message_uses_problem_body_for_http_errors() {
        let err = ApiError::Http {
            status: 400,
            body: r#"{"type":"about:blank","title":"Bad Request","status":400,"detail":"Cart is empty"}"#
                .to_string(),
        };
        assert_eq!(err.user_message(), "Cart is empty");

        let network = ApiError::Network("connection refused".to_string());
        assert_eq!(network.user_message(), "Network error: connection refused");
    }

    #[test]
    fn unauthorized_is_only_401() {
        assert!(ApiError::Http { status: 401, body: String::new() }.is_unauthorized());
        assert!(!ApiError::Http { status: 403, body: String::new() }.is_unauthorized());
        assert!(!ApiError::Network("x".into()).is_unauthorized());
    }
}
