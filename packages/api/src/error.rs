//! # API error taxonomy
//!
//! Every service method returns `Result<T, ApiError>`. The `Display` output is the
//! single message a view shows in its alert banner: the server's `message` when the
//! body carries one, otherwise the operation's fallback text. Low-level details
//! (socket errors, serde paths) are logged, not displayed.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-2xx status other than 401.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The server rejected the credential. The persisted session has been cleared.
    #[error("{message}")]
    Unauthorized { message: String },

    /// A 2xx response whose body did not have the expected shape.
    #[error("{0}")]
    Decode(String),

    /// The request could not be built from its arguments. Nothing was sent.
    #[error("{0}")]
    Invalid(String),
}

impl ApiError {
    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// The user-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Build the error for a non-2xx response, preferring the body's `message`.
    pub(crate) fn from_response(status: u16, body: &[u8], fallback: &str) -> Self {
        let message = server_message(body).unwrap_or_else(|| fallback.to_string());
        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Server { status, message }
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Extract the human-readable message from an error body, if any.
fn server_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_wins_over_fallback() {
        let err = ApiError::from_response(
            400,
            br#"{"status":"error","message":"Name already taken","code":"DUP"}"#,
            "Failed to create family",
        );
        assert_eq!(err.to_string(), "Name already taken");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_fallback_when_body_is_not_json() {
        let err = ApiError::from_response(502, b"<html>Bad gateway</html>", "Failed to load photos");
        assert_eq!(
            err,
            ApiError::Server {
                status: 502,
                message: "Failed to load photos".to_string()
            }
        );
    }

    #[test]
    fn test_401_is_unauthorized() {
        let err = ApiError::from_response(401, br#"{"message":"Token expired"}"#, "x");
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Token expired");
    }
}
