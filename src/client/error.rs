//! Client Error Types
//!
//! Errors surfaced by the HTTP client wrapper. Everything except 401 is
//! passed to the caller unchanged; interpretation belongs to the page.

use thiserror::Error;

/// Errors returned by API calls
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered 401
    #[error("Not authenticated")]
    Unauthorized { detail: Option<String> },

    /// Any other non-2xx response
    #[error("API error {status}: {message}")]
    Rejected {
        status: u16,
        detail: Option<String>,
        message: String,
    },

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The HTTP client could not be built
    #[error("Client configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Build a rejection from a status code and raw response body
    pub fn rejected(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        let message = match &detail {
            Some(detail) => detail.clone(),
            None if !body.trim().is_empty() => body.trim().to_string(),
            None => reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown error")
                .to_string(),
        };

        ApiError::Rejected {
            status,
            detail,
            message,
        }
    }

    /// Backend-supplied detail message, when there is one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail } | ApiError::Rejected { detail, .. } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// HTTP status of the failed response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message to show the user: the backend detail, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Extract the human-readable detail from an error body
///
/// Understands `{"detail": "..."}`, validation lists
/// `{"detail": [{"msg": "..."}]}` and `{"message": "..."}`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    match value.get("detail") {
        Some(serde_json::Value::String(s)) => return Some(s.clone()),
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(|m| m.as_str()).map(str::to_string),
                })
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }

    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
