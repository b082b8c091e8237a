//! Unified error handling.
//!
//! Provides a unified `AppError` aggregating the component error types.
//! Nothing in this application is fatal: auth failures render as messages,
//! catalog failures become an error view with a manual retry, and corrupted
//! persisted state degrades to absence before it ever reaches this type.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Durable storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog fetch failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

impl AppError {
    /// Whether this error is a user-correctable failure (bad input, wrong
    /// credentials) rather than an infrastructure problem.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        match self {
            Self::Auth(err) => !matches!(err, AuthError::Storage(_)),
            Self::Config(_) | Self::Storage(_) | Self::Catalog(_) => false,
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
