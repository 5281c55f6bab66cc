//! Error types for the credit ledger.

use psyreports_activation::CodeRejected;
use thiserror::Error;

/// Ledger errors.
#[derive(Debug, Error)]
pub enum CreditsError {
    /// The activation code did not validate for this installation.
    #[error(transparent)]
    Rejected(#[from] CodeRejected),

    /// The code validated but its credits cannot be added to a balance.
    #[error("unreadable entitlement: {0}")]
    UnreadableEntitlement(String),

    /// Not enough credits for the requested spend.
    #[error("insufficient credits: need {needed}, have {available}")]
    InsufficientCredits { needed: u64, available: u64 },

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for ledger operations.
pub type CreditsResult<T> = Result<T, CreditsError>;
