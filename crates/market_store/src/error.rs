//! Market store error types.

use thiserror::Error;

/// Errors that can occur during market store operations.
///
/// The core marketplace operations (posting, responding, messaging) never
/// fail on the in-memory store; these errors come from lookups and status
/// changes.
#[derive(Debug, Error)]
pub enum MarketStoreError {
    /// Entity not found.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Invalid state transition.
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },
}

impl MarketStoreError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an invalid state transition error.
    pub fn invalid_transition(from: impl ToString, to: impl ToString) -> Self {
        Self::InvalidStateTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Result type for market store operations.
pub type MarketStoreResult<T> = Result<T, MarketStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_build_each_variant() {
        let describe = |err: &MarketStoreError| match err {
            MarketStoreError::NotFound { entity_type, .. } => *entity_type,
            MarketStoreError::InvalidStateTransition { .. } => "transition",
        };

        let err = MarketStoreError::not_found("ServiceRequest", "42");
        assert_eq!(describe(&err), "ServiceRequest");
        assert_eq!(err.to_string(), "ServiceRequest not found: 42");

        let err = MarketStoreError::invalid_transition("termine", "ouvert");
        assert_eq!(describe(&err), "transition");
        assert_eq!(
            err.to_string(),
            "Invalid state transition from termine to ouvert"
        );
    }
}
