//! Error types for the activation module.

use thiserror::Error;

/// Activation-specific errors.
#[derive(Debug, Error)]
pub enum ActivationError {
    /// The key-value store could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for activation operations.
pub type ActivationResult<T> = Result<T, ActivationError>;

/// A code failed validation.
///
/// Carries no detail: malformed encoding, wrong field count, salt mismatch
/// and device mismatch are indistinguishable to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid activation code")]
pub struct CodeRejected;
