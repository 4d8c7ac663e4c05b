use std::time::Duration;

use thiserror::Error;

/// Every way an ask can fail. Any of these aborts the whole request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AskError {
    /// The caller sent something we can't work with (blank question, no notes array, bad JSON).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Two embeddings of different length were compared.
    #[error("embedding dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// The embedding provider failed or returned a malformed reply.
    #[error("embedding failed: {0}")]
    Embedding(String),
    /// The chat provider failed.
    #[error("generation failed: {0}")]
    Generation(String),
    #[error("ask timed out after {0:?}")]
    Timeout(Duration),
}

impl AskError {
    /// Client errors are the caller's fault and must not be retried.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AskError::InvalidRequest(_))
    }

    /// True when a collaborator (embedder or generator) is to blame.
    pub fn is_dependency_failure(&self) -> bool {
        matches!(self, AskError::Embedding(_) | AskError::Generation(_))
    }

    pub(crate) fn embedding(err: anyhow::Error) -> Self {
        AskError::Embedding(format!("{:#}", err))
    }

    pub(crate) fn generation(err: anyhow::Error) -> Self {
        AskError::Generation(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_is_client_error() {
        let err = AskError::InvalidRequest("question and notes[] required".into());
        assert!(err.is_client_error());
        assert!(!err.is_dependency_failure());
        assert_eq!(
            err.to_string(),
            "invalid request: question and notes[] required"
        );
    }

    #[test]
    fn test_dependency_failures() {
        assert!(AskError::Embedding("boom".into()).is_dependency_failure());
        assert!(AskError::Generation("boom".into()).is_dependency_failure());
        assert!(!AskError::DimensionMismatch {
            expected: 3,
            found: 2
        }
        .is_dependency_failure());
        assert!(!AskError::Timeout(Duration::from_secs(1)).is_client_error());
    }

    #[test]
    fn test_collaborator_message_is_kept() {
        let err = AskError::embedding(
            anyhow::anyhow!("401 Unauthorized").context("embeddings request failed"),
        );
        let msg = err.to_string();
        assert!(msg.contains("embeddings request failed"));
        assert!(msg.contains("401 Unauthorized"));
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = AskError::DimensionMismatch {
            expected: 1536,
            found: 768,
        };
        assert_eq!(
            err.to_string(),
            "embedding dimension mismatch: expected 1536, found 768"
        );
    }
}
