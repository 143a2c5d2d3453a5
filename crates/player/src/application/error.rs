//! Session error types
//!
//! Sessions fail either at the HTTP boundary or on a local graph check. Both
//! leave the session in its last known-good state.

use storyloom_domain::DomainError;
use thiserror::Error;

use crate::ports::outbound::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl SessionError {
    /// Check if this is a "not found" error, local or remote
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api(e) => e.is_not_found(),
            Self::Domain(e) => e.is_not_found(),
        }
    }

    /// Whether a manual retry of the same action may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.is_retryable(),
            Self::Domain(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_covers_both_layers() {
        assert!(SessionError::from(ApiError::http(404, "Story not found")).is_not_found());
        assert!(SessionError::from(DomainError::not_found("StoryNode", "9")).is_not_found());
        assert!(!SessionError::from(DomainError::validation("empty")).is_not_found());
    }

    #[test]
    fn display_is_transparent() {
        let err = SessionError::from(ApiError::http(500, "server error"));
        assert_eq!(err.to_string(), "HTTP error 500: server error");
        assert!(err.is_retryable());
    }
}
