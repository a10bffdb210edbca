//! Repository traits for alias → URL storage.

use crate::domain::errors::StorageResult;
use async_trait::async_trait;

/// Creates URL records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlSaver: Send + Sync {
    /// Inserts a new record and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::AliasConflict`] when the alias is taken. The conflict
    /// must come from the store's atomic uniqueness enforcement so that of two
    /// concurrent creators with the same alias exactly one succeeds.
    ///
    /// Returns [`StorageError::Unavailable`] or [`StorageError::Timeout`] on
    /// backend failures.
    ///
    /// [`StorageError::AliasConflict`]: crate::domain::errors::StorageError::AliasConflict
    /// [`StorageError::Unavailable`]: crate::domain::errors::StorageError::Unavailable
    /// [`StorageError::Timeout`]: crate::domain::errors::StorageError::Timeout
    async fn create(&self, target_url: &str, alias: &str) -> StorageResult<i64>;
}

/// Resolves aliases to target URLs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlGetter: Send + Sync {
    /// Returns the target URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`](crate::domain::errors::StorageError::NotFound)
    /// when no record has that alias.
    async fn get_by_alias(&self, alias: &str) -> StorageResult<String>;
}

/// Removes URL records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlDeleter: Send + Sync {
    /// Removes the record stored under `alias` and returns its former identifier.
    ///
    /// Deleting a missing alias is an error, not a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`](crate::domain::errors::StorageError::NotFound)
    /// when no record has that alias.
    async fn delete_by_alias(&self, alias: &str) -> StorageResult<i64>;
}

/// Full storage contract: the three capabilities plus maintenance operations.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local
#[async_trait]
pub trait UrlRepository: UrlSaver + UrlGetter + UrlDeleter {
    /// Returns the identifier of a record pointing at `target_url`.
    ///
    /// Several aliases may share a target; the oldest record wins.
    async fn get_id_by_url(&self, target_url: &str) -> StorageResult<i64>;

    /// Removes every record. Meant for test isolation only.
    async fn truncate(&self) -> StorageResult<()>;

    /// Checks that the backend answers.
    async fn ping(&self) -> StorageResult<()>;
}
