//! Application error types.

use crate::views::FormError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Authentication required.
    #[error("Vous devez être connecté")]
    AuthenticationRequired,

    /// Permission denied.
    #[error("Action non autorisée : {0}")]
    PermissionDenied(String),

    /// Form validation failed.
    #[error(transparent)]
    Form(#[from] FormError),

    /// Session error.
    #[error("Auth error: {0}")]
    Auth(#[from] auth::AuthError),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] market_store::MarketStoreError),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Errors the user can fix by retrying differently.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationRequired
                | Self::PermissionDenied(_)
                | Self::Form(_)
                | Self::Store(market_store::MarketStoreError::InvalidStateTransition { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_errors_display_unchanged() {
        let err: AppError = FormError::PasswordMismatch.into();
        assert_eq!(err.to_string(), FormError::PasswordMismatch.to_string());
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_store_error_visibility() {
        let err: AppError = market_store::MarketStoreError::not_found("ServiceRequest", "x").into();
        assert!(!err.is_user_facing());

        let err: AppError =
            market_store::MarketStoreError::invalid_transition("termine", "ouvert").into();
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_lookup_misses_are_form_errors() {
        let err: AppError = FormError::NotListed(5).into();
        assert_eq!(err.to_string(), "Aucune demande n°5 dans la liste");
        assert!(err.is_user_facing());
        assert!(!matches!(err, AppError::PermissionDenied(_)));
    }
}
