//! Process-local implementation of the URL repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::UrlRecord;
use crate::domain::errors::{StorageError, StorageResult};
use crate::domain::repositories::{UrlDeleter, UrlGetter, UrlRepository, UrlSaver};

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    records: HashMap<String, UrlRecord>,
}

/// In-memory repository keyed by alias.
///
/// The uniqueness check and the insert happen under one lock, so concurrent
/// creators of the same alias see exactly one success. Identifiers grow
/// monotonically and are never reused, including after [`UrlRepository::truncate`].
///
/// Used by tests and local runs without PostgreSQL; contents die with the process.
#[derive(Debug, Default)]
pub struct InMemoryUrlRepository {
    inner: Mutex<Inner>,
}

impl InMemoryUrlRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().map(|inner| inner.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StorageError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UrlSaver for InMemoryUrlRepository {
    async fn create(&self, target_url: &str, alias: &str) -> StorageResult<i64> {
        let mut guard = self.lock()?;
        let inner = &mut *guard;
        let id = inner.last_id + 1;

        match inner.records.entry(alias.to_string()) {
            Entry::Occupied(_) => Err(StorageError::AliasConflict(alias.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(UrlRecord::new(id, alias, target_url));
                inner.last_id = id;
                Ok(id)
            }
        }
    }
}

#[async_trait]
impl UrlGetter for InMemoryUrlRepository {
    async fn get_by_alias(&self, alias: &str) -> StorageResult<String> {
        self.lock()?
            .records
            .get(alias)
            .map(|record| record.target_url.clone())
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl UrlDeleter for InMemoryUrlRepository {
    async fn delete_by_alias(&self, alias: &str) -> StorageResult<i64> {
        self.lock()?
            .records
            .remove(alias)
            .map(|record| record.id)
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn get_id_by_url(&self, target_url: &str) -> StorageResult<i64> {
        self.lock()?
            .records
            .values()
            .filter(|record| record.target_url == target_url)
            .map(|record| record.id)
            .min()
            .ok_or(StorageError::NotFound)
    }

    async fn truncate(&self) -> StorageResult<()> {
        self.lock()?.records.clear();
        Ok(())
    }

    async fn ping(&self) -> StorageResult<()> {
        self.lock().map(|_| ())
    }
}
