//! Error types for the REST client and notice text helpers.

use thiserror::Error;

/// Errors raised by [`crate::api::UserApi`] implementations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, TLS...).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The configured base URL is unusable.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

/// Result type for API client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Text for a user-visible error notice: the error's own message when it has
/// one, otherwise `fallback`.
pub fn notice_text(err: &ApiError, fallback: &str) -> String {
    let msg = match err {
        ApiError::Status { message, .. } if message.trim().is_empty() => String::new(),
        other => other.to_string(),
    };
    if msg.is_empty() {
        fallback.to_string()
    } else {
        msg
    }
}
