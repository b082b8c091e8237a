//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
///
/// Everything except `Storage` is an ordinary user-facing failure result,
/// rendered as a message and never treated as fatal. Password strength and
/// required-field checks are the calling form's job, not this service's.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] shophub_core::EmailError),

    /// Email already present in the registry.
    #[error("email already registered")]
    EmailTaken,

    /// No account matches the email/password pair.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Durable storage failed underneath the registry or session.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
