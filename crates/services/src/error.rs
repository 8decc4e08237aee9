//! Shared error types for the services crate.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use tutor_core::quiz::QuizFlowError;

/// Shown when a failed response carries no usable `"error"` field.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Normalized failure of one backend call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Non-success status; `message` is the body's `"error"` field or the generic text.
    #[error("{message} (status {status})")]
    Status { status: StatusCode, message: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    #[must_use]
    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Build a status error from a raw response body.
    #[must_use]
    pub fn from_body(status: StatusCode, body: &[u8]) -> Self {
        Self::status(status, extract_error_message(body))
    }

    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(err) => err.status(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND)
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Text suitable for a user-facing notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Pull the `"error"` string out of a JSON error body.
#[must_use]
pub fn extract_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}

/// Errors emitted by `ApiConfig`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid backend url {raw:?}: {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("backend url must use http or https: {0}")]
    UnsupportedScheme(String),
    #[error("invalid timeout {0:?}")]
    InvalidTimeout(String),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Flow(#[from] QuizFlowError),
}

/// Errors emitted while assembling `AppServices`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_error_field() {
        let message = extract_error_message(br#"{"error": "Username already exists"}"#);
        assert_eq!(message, "Username already exists");
    }

    #[test]
    fn falls_back_to_generic_message() {
        assert_eq!(extract_error_message(b"<html>502</html>"), GENERIC_ERROR_MESSAGE);
        assert_eq!(
            extract_error_message(br#"{"message": "No recommendations"}"#),
            GENERIC_ERROR_MESSAGE
        );
        assert_eq!(extract_error_message(br#"{"error": "  "}"#), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn status_helpers() {
        let err = ApiError::from_body(StatusCode::NOT_FOUND, br#"{"error": "User not found"}"#);
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
        assert_eq!(err.user_message(), "User not found");

        let decode = ApiError::Decode("eof".into());
        assert_eq!(decode.user_message(), GENERIC_ERROR_MESSAGE);
        assert!(decode.status_code().is_none());
    }
}
