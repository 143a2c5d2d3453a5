//! Errors at the HTTP boundary.

use thiserror::Error;

/// Failure of a single request against the story API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not complete (connection refused, timeout, ...)
    #[error("Request failed: {0}")]
    Network(String),

    /// Non-2xx response; `body` is the server's text, verbatim
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// Response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Request body could not be encoded
    #[error("Failed to serialize request: {0}")]
    Serialize(String),
}

impl ApiError {
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Network failures and server-side errors may succeed on a manual retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Parse(_) | Self::Serialize(_) => false,
        }
    }
}
