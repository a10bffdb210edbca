//! Storage error vocabulary shared by every repository implementation.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors a storage backend may return.
///
/// The set is closed: callers match on variants instead of comparing messages.
/// Engine-specific failures are folded into [`StorageError::Unavailable`] or
/// [`StorageError::Timeout`] with the original message kept for logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The alias is already taken. Raised from the store's uniqueness
    /// constraint, never from a prior existence check.
    #[error("alias already exists: {0}")]
    AliasConflict(String),

    /// No record matches the lookup key.
    #[error("url not found")]
    NotFound,

    /// The backend failed (connection loss, query error, poisoned state).
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// The operation did not finish before its deadline.
    #[error("storage operation timed out: {0}")]
    Timeout(String),
}
