//! Domain-level error types.

use thiserror::Error;

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Store operation failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,
}

/// Object-store errors. Detail stays server-side; callers surface a
/// generic failure to clients.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object write failed: {0}")]
    Write(String),
}

/// Image derivation errors - always scoped to a single file.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}

/// Authentication/authorization errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Email not in allowed list")]
    NotAllowed,
}
