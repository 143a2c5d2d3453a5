//! Unified error types for the domain layer
//!
//! Graph lookups, draft edits and document validation all report through
//! `DomainError` so callers can surface a broken link or a bad index without
//! falling back to strings.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Lookup miss, e.g. an option pointing at a node that is not in the story
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Validation failed (e.g., empty content on save)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Index into an ordered collection is out of bounds
    #[error("Index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    /// Navigation target is not reachable from the current position
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Parse error (for documents and value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a validation error for rejected input.
    ///
    /// # Example
    /// ```ignore
    /// if content.trim().is_empty() {
    ///     return Err(DomainError::validation("Node content cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an out of range error
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Create an invalid target error
    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTarget(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("content cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: content cannot be empty");
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("StoryNode", "42");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: StoryNode with id 42");
    }

    #[test]
    fn test_out_of_range_error() {
        let err = DomainError::out_of_range(3, 1);
        assert_eq!(err, DomainError::OutOfRange { index: 3, len: 1 });
        assert_eq!(err.to_string(), "Index 3 out of range (len 1)");
    }

    #[test]
    fn test_invalid_target_is_not_not_found() {
        let err = DomainError::invalid_target("node 7 has not been visited");
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("node 7"));
    }
}
