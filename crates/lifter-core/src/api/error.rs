use serde::Deserialize;
use thiserror::Error;

use crate::models::AttemptPosition;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authorization token not provided")]
    TokenNotProvided,

    #[error("Authorization token is not valid - supply a new refresh token")]
    TokenNotValid,

    #[error("Invalid lifts: {reason}. CHECK: {position} lift")]
    InvalidLifts {
        position: AttemptPosition,
        reason: String,
    },

    #[error("Missing or extra fields: {0}")]
    MissingOrExtraFields(String),

    #[error("{0}")]
    InvalidDate(String),

    #[error("{0}")]
    InvalidDateTime(String),

    #[error("Not allowed: {0}")]
    NotAllowed(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - access token rejected")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error bodies from the API are `{"detail": "..."}`.
#[derive(Deserialize)]
struct DetailBody {
    detail: String,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// Pull the `detail` message out of an error body, falling back to the
    /// (truncated) raw body.
    fn detail_or_body(body: &str) -> String {
        match serde_json::from_str::<DetailBody>(body) {
            Ok(parsed) => parsed.detail,
            Err(_) => Self::truncate_body(body),
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(Self::detail_or_body(body)),
            404 => ApiError::NotFound(Self::detail_or_body(body)),
            500..=599 => ApiError::ServerError(Self::truncate_body(body)),
            _ => ApiError::InvalidResponse(format!(
                "Status {}: {}",
                status,
                Self::truncate_body(body)
            )),
        }
    }

    /// Whether this error is a 404 from the remote API.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}
