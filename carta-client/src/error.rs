//! Client error types

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Structured error returned by the backend
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error body the backend sends alongside non-2xx responses
#[derive(Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(alias = "error")]
    pub message: String,
}

impl ClientError {
    /// Map a non-success response to an error.
    ///
    /// A JSON `{"message": ..}` (or `{"error": ..}`) body becomes
    /// [`ClientError::Api`]; anything else falls back to the status code.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            return Self::Api {
                status: status.as_u16(),
                message: api_err.message,
            };
        }
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden(body),
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::CONFLICT => Self::Conflict(body),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(body),
            _ => Self::Api {
                status: status.as_u16(),
                message: body,
            },
        }
    }

    /// HTTP status behind this error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Unauthorized => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            Self::Validation(_) => Some(400),
            Self::Api { status, .. } => Some(*status),
            Self::InvalidResponse(_) | Self::Internal(_) | Self::Serialization(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
