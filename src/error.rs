//! Error types for the ungdoc library.

use std::io;
use thiserror::Error;

/// Result type alias for ungdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document conversion and replication.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The target document does not exist in the backing store.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The caller is not allowed to access the target document.
    #[error("Permission denied for document: {0}")]
    PermissionDenied(String),

    /// The backing store signalled a rate limit.
    #[error("Rate limited by the document store")]
    RateLimited,

    /// Source and destination structures disagree (e.g. table shape).
    #[error("Structural mismatch: {0}")]
    StructuralMismatch(String),

    /// Any other backend failure; propagated without local recovery.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The document tree violates a model invariant.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Error during rendering to Markdown or sections.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error decoding a serialized document.
    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error aborts only the element being replicated, not the
    /// whole run.
    pub fn is_localized(&self) -> bool {
        matches!(self, Error::StructuralMismatch(_))
    }

    /// Whether a single retry after a cooldown is permitted.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RateLimited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::RateLimited;
        assert_eq!(err.to_string(), "Rate limited by the document store");

        let err = Error::NotFound("doc-123".to_string());
        assert_eq!(err.to_string(), "Document not found: doc-123");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_retryable() {
        assert!(Error::RateLimited.is_retryable());
        assert!(!Error::Transport("boom".into()).is_retryable());
    }

    #[test]
    fn test_localized() {
        assert!(Error::StructuralMismatch("2x2 vs 2x3".into()).is_localized());
        assert!(!Error::RateLimited.is_localized());
    }
}
