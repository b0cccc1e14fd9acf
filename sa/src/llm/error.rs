//! Generation client error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the generation endpoint
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No API credential supplied")]
    MissingCredential,
}

impl LlmError {
    /// Check if this error is retryable
    ///
    /// Every non-success status is retried the same way: rate limiting, auth
    /// failures and server errors are not told apart.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::ApiError { .. } => true,
            LlmError::Network(_) => true,
            LlmError::Timeout(_) => true,
            LlmError::InvalidResponse(_) => false,
            LlmError::Json(_) => false,
            LlmError::MissingCredential => false,
        }
    }

    /// HTTP status if the endpoint answered with one
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
