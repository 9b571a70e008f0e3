//! Error types for PLAYVAULT.

use thiserror::Error;

use crate::auth::{AuthError, RegisterError};
use crate::store::StorageError;

/// Common error type for PLAYVAULT.
///
/// The per-module enums ([`StorageError`], [`RegisterError`],
/// [`AuthError`]) carry the precise failure; this type aggregates them for
/// plumbing that spans modules, such as the binary and configuration
/// loading.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Durable storage failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Registration failure.
    #[error(transparent)]
    Register(#[from] RegisterError),

    /// Authentication failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for PLAYVAULT operations.
pub type Result<T> = std::result::Result<T, VaultError>;
