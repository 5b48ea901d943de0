//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during session operations.
///
/// Credentials are never checked, so every variant comes from the session
/// storage backend.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Storage key that cannot be mapped onto the backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;
