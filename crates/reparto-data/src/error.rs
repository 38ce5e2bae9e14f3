//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to the marketplace API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request or read the response.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// 401/403, or a call that needs a login made without one.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// Whether retrying the same call later might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::RequestError(_) => true,
            FetchError::HttpError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}
