//! Policy errors

use thiserror::Error;

use crate::error::{AppError, ErrorCode};

/// Errors raised while reading ordering configuration or shift times
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Malformed time string or out-of-range field
    #[error("validation error: {0}")]
    Validation(String),

    /// Unrecognized cutoff mode or a required field of the active mode missing
    #[error("configuration error: {0}")]
    Configuration(String),
}

pub type PolicyResult<T> = Result<T, PolicyError>;

impl From<PolicyError> for AppError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::Validation(msg) => AppError::validation(msg),
            PolicyError::Configuration(msg) => {
                AppError::with_message(ErrorCode::PolicyMisconfigured, msg)
            }
        }
    }
}
