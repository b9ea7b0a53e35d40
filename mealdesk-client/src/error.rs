//! Client error types

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use shared::{AppError, ErrorCode, PolicyError};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Structured error returned by the server, or raised locally by the
    /// same validation the server runs
    #[error("API error {code}: {message}")]
    Api {
        code: u16,
        message: String,
        details: Option<HashMap<String, Value>>,
    },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error without a structured body
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Settings or shift data the eligibility policy cannot work with
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),
}

impl ClientError {
    /// Error code of an [`ClientError::Api`] error
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => ErrorCode::try_from(*code).ok(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Api { .. } => matches!(
                self.code(),
                Some(ErrorCode::NotFound | ErrorCode::ShiftNotFound)
            ),
            _ => false,
        }
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        Self::Api {
            code: err.code.code(),
            message: err.message,
            details: err.details,
        }
    }
}

/// Error body sent by the server (`ApiResponse` without data)
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiErrorResponse {
    /// Map a non-2xx response body to a [`ClientError`]
    pub(crate) fn into_error(status: http::StatusCode, text: String) -> ClientError {
        if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text) {
            return ClientError::Api {
                code: api_err.code,
                message: api_err.message,
                details: api_err.details,
            };
        }
        match status {
            http::StatusCode::NOT_FOUND => ClientError::NotFound(text),
            http::StatusCode::BAD_REQUEST | http::StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(text)
            }
            _ => ClientError::Internal(format!("{status}: {text}")),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_structured_body_becomes_api_error() {
        let body = r#"{"code":1001,"message":"Shift 7 not found","details":{"id":"7"}}"#;
        let err = ApiErrorResponse::into_error(StatusCode::NOT_FOUND, body.to_string());

        assert_eq!(err.code(), Some(ErrorCode::ShiftNotFound));
        assert!(err.is_not_found());
        match err {
            ClientError::Api { details, .. } => {
                assert_eq!(details.unwrap().get("id").unwrap(), "7");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_plain_body_falls_back_to_status() {
        let err = ApiErrorResponse::into_error(StatusCode::NOT_FOUND, "nope".into());
        assert!(matches!(err, ClientError::NotFound(_)));

        let err = ApiErrorResponse::into_error(StatusCode::BAD_REQUEST, "bad".into());
        assert!(matches!(err, ClientError::Validation(_)));

        let err = ApiErrorResponse::into_error(StatusCode::BAD_GATEWAY, "down".into());
        assert!(matches!(err, ClientError::Internal(_)));
    }

    #[test]
    fn test_local_validation_matches_server_shape() {
        let err: ClientError = AppError::new(ErrorCode::ShiftEmptyWindow).into();
        assert_eq!(err.code(), Some(ErrorCode::ShiftEmptyWindow));
        assert!(!err.is_not_found());
    }
}
