//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::future::Future;
use std::time::Duration;

use crate::domain::errors::{StorageError, StorageResult};
use crate::domain::repositories::{UrlDeleter, UrlGetter, UrlRepository, UrlSaver};

/// Default per-statement deadline.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// PostgreSQL repository for alias → URL records.
///
/// Alias uniqueness is enforced by the `idx_url_alias` unique index; a duplicate
/// insert is detected from the resulting unique-violation, never from a lookup
/// beforehand. Every statement runs under a deadline and reports
/// [`StorageError::Timeout`] when it expires instead of waiting on the pool or
/// the server indefinitely.
#[derive(Debug, Clone)]
pub struct PgUrlRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Overrides the per-statement deadline.
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `url` table and its unique alias index if they are missing.
    ///
    /// Safe to call on every start.
    pub async fn bootstrap(&self) -> StorageResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Unavailable(format!("schema bootstrap failed: {e}")))
    }

    /// Runs `query` under the configured deadline.
    ///
    /// The outer result carries the deadline, the inner one the query outcome,
    /// so callers can still inspect the raw `sqlx` error (unique violations).
    async fn with_deadline<T, F>(
        &self,
        operation: &str,
        query: F,
    ) -> StorageResult<Result<T, sqlx::Error>>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        tokio::time::timeout(self.query_timeout, query)
            .await
            .map_err(|_| {
                StorageError::Timeout(format!(
                    "{operation} exceeded {}ms",
                    self.query_timeout.as_millis()
                ))
            })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        _ => StorageError::Unavailable(message),
    }
}

#[async_trait]
impl UrlSaver for PgUrlRepository {
    async fn create(&self, target_url: &str, alias: &str) -> StorageResult<i64> {
        let query = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO url (alias, url)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(alias)
        .bind(target_url)
        .fetch_one(&self.pool);

        match self.with_deadline("create", query).await? {
            Ok(id) => Ok(id),
            Err(e) if is_unique_violation(&e) => {
                Err(StorageError::AliasConflict(alias.to_string()))
            }
            Err(e) => Err(map_sqlx_error(e)),
        }
    }
}

#[async_trait]
impl UrlGetter for PgUrlRepository {
    async fn get_by_alias(&self, alias: &str) -> StorageResult<String> {
        let query = sqlx::query_scalar::<_, String>("SELECT url FROM url WHERE alias = $1")
            .bind(alias)
            .fetch_optional(&self.pool);

        self.with_deadline("get_by_alias", query)
            .await?
            .map_err(map_sqlx_error)?
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl UrlDeleter for PgUrlRepository {
    async fn delete_by_alias(&self, alias: &str) -> StorageResult<i64> {
        let query = sqlx::query_scalar::<_, i64>("DELETE FROM url WHERE alias = $1 RETURNING id")
            .bind(alias)
            .fetch_optional(&self.pool);

        self.with_deadline("delete_by_alias", query)
            .await?
            .map_err(map_sqlx_error)?
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn get_id_by_url(&self, target_url: &str) -> StorageResult<i64> {
        let query =
            sqlx::query_scalar::<_, i64>("SELECT id FROM url WHERE url = $1 ORDER BY id LIMIT 1")
                .bind(target_url)
                .fetch_optional(&self.pool);

        self.with_deadline("get_id_by_url", query)
            .await?
            .map_err(map_sqlx_error)?
            .ok_or(StorageError::NotFound)
    }

    async fn truncate(&self) -> StorageResult<()> {
        let query = sqlx::query("TRUNCATE TABLE url").execute(&self.pool);

        self.with_deadline("truncate", query)
            .await?
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn ping(&self) -> StorageResult<()> {
        let query = sqlx::query("SELECT 1").execute(&self.pool);

        self.with_deadline("ping", query)
            .await?
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
