//! Save / redirect / delete orchestration over the storage capabilities.

use std::sync::Arc;

use tracing::{debug, error, info};
use url::Url;

use crate::domain::entities::{DeletedUrl, SavedUrl};
use crate::domain::errors::StorageError;
use crate::domain::repositories::{UrlDeleter, UrlGetter, UrlRepository, UrlSaver};
use crate::error::AppError;
use crate::utils::alias_generator::{AliasGenerator, validate_alias};

/// Service translating save, redirect and delete intents into storage calls.
///
/// It is the only place where [`StorageError`] is interpreted. Conflicts and
/// missing aliases become ordinary [`AppError`] outcomes; backend failures are
/// logged with full detail and surfaced as [`AppError::StorageUnavailable`].
///
/// Each operation only requires the storage capability it uses, so tests can
/// substitute a mock of a single narrow trait. The service holds no state of
/// its own between requests.
pub struct ResolutionService<S: ?Sized> {
    storage: Arc<S>,
    generator: AliasGenerator,
    generation_attempts: usize,
}

impl<S: ?Sized> ResolutionService<S> {
    /// Creates a service with the default generator and no generation retries.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            generator: AliasGenerator::default(),
            generation_attempts: 1,
        }
    }

    /// Replaces the alias generator.
    pub fn with_generator(mut self, generator: AliasGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Sets how many generated aliases are tried before a collision is reported.
    ///
    /// Caller-supplied aliases are never retried. Values below 1 are treated as 1.
    pub fn with_generation_attempts(mut self, attempts: usize) -> Self {
        self.generation_attempts = attempts.max(1);
        self
    }
}

impl<S: UrlSaver + ?Sized> ResolutionService<S> {
    /// Stores `target_url` under `alias`, generating an alias when none is given.
    ///
    /// An empty alias counts as absent.
    ///
    /// # Errors
    ///
    /// - [`AppError::ValidationFailed`] on `url` if it is empty or not an absolute URL,
    ///   or on `alias` if the supplied alias is unusable. Nothing is stored.
    /// - [`AppError::AliasAlreadyExists`] if the alias is taken. For generated
    ///   aliases this happens once every configured attempt has collided.
    /// - [`AppError::StorageUnavailable`] on backend failures.
    pub async fn save(&self, target_url: &str, alias: Option<&str>) -> Result<SavedUrl, AppError> {
        validate_target_url(target_url)?;

        match alias.filter(|a| !a.is_empty()) {
            Some(alias) => {
                validate_alias(alias)?;
                let id = self
                    .storage
                    .create(target_url, alias)
                    .await
                    .map_err(|e| save_error(alias, e))?;

                info!(alias, id, "url added");
                Ok(SavedUrl {
                    id,
                    alias: alias.to_string(),
                })
            }
            None => self.save_with_generated_alias(target_url).await,
        }
    }

    async fn save_with_generated_alias(&self, target_url: &str) -> Result<SavedUrl, AppError> {
        let mut attempt = 1;

        loop {
            let alias = self.generator.generate();

            match self.storage.create(target_url, &alias).await {
                Ok(id) => {
                    info!(alias = %alias, id, attempt, "url added with generated alias");
                    return Ok(SavedUrl { id, alias });
                }
                Err(StorageError::AliasConflict(_)) if attempt < self.generation_attempts => {
                    debug!(alias = %alias, attempt, "generated alias collided, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(save_error(&alias, e)),
            }
        }
    }
}

impl<S: UrlGetter + ?Sized> ResolutionService<S> {
    /// Resolves `alias` to the URL a caller should be redirected to.
    ///
    /// # Errors
    ///
    /// - [`AppError::EmptyAlias`] for an empty alias
    /// - [`AppError::NoUrlForAlias`] if nothing is stored under it
    /// - [`AppError::StorageUnavailable`] on backend failures
    pub async fn redirect(&self, alias: &str) -> Result<String, AppError> {
        if alias.is_empty() {
            info!("alias is empty");
            return Err(AppError::EmptyAlias);
        }

        match self.storage.get_by_alias(alias).await {
            Ok(target_url) => {
                info!(alias, "found url by alias");
                Ok(target_url)
            }
            Err(StorageError::NotFound) => {
                info!(alias, "no url on this alias");
                Err(AppError::NoUrlForAlias)
            }
            Err(e) => Err(storage_failure("get url by alias", alias, e)),
        }
    }
}

impl<S: UrlDeleter + ?Sized> ResolutionService<S> {
    /// Removes the record stored under `alias`.
    ///
    /// # Errors
    ///
    /// - [`AppError::EmptyAlias`] for an empty alias
    /// - [`AppError::NothingToDelete`] if nothing is stored under it
    /// - [`AppError::StorageUnavailable`] on backend failures
    pub async fn delete(&self, alias: &str) -> Result<DeletedUrl, AppError> {
        if alias.is_empty() {
            info!("alias is empty");
            return Err(AppError::EmptyAlias);
        }

        match self.storage.delete_by_alias(alias).await {
            Ok(id) => {
                info!(alias, deleted_id = id, "deleted url by alias");
                Ok(DeletedUrl {
                    id,
                    alias: alias.to_string(),
                })
            }
            Err(StorageError::NotFound) => {
                info!(alias, "nothing to delete");
                Err(AppError::NothingToDelete)
            }
            Err(e) => Err(storage_failure("delete url by alias", alias, e)),
        }
    }
}

impl<S: UrlRepository + ?Sized> ResolutionService<S> {
    /// Checks that storage answers; used by the health endpoint.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.storage
            .ping()
            .await
            .map_err(|e| storage_failure("ping storage", "", e))
    }
}

/// Requires a non-empty absolute URL that can be echoed in a `Location` header.
fn validate_target_url(target_url: &str) -> Result<(), AppError> {
    if target_url.is_empty() {
        return Err(AppError::required("url"));
    }

    // `Url::parse` silently strips tabs and newlines; the stored string must not contain them.
    if target_url.chars().any(char::is_control) || Url::parse(target_url).is_err() {
        return Err(AppError::invalid_url("url"));
    }

    Ok(())
}

fn save_error(alias: &str, e: StorageError) -> AppError {
    match e {
        StorageError::AliasConflict(_) => {
            info!(alias, "alias already exists");
            AppError::AliasAlreadyExists
        }
        e => storage_failure("add url", alias, e),
    }
}

fn storage_failure(operation: &str, alias: &str, e: StorageError) -> AppError {
    error!(operation, alias, error = %e, "storage failure");
    AppError::StorageUnavailable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockUrlDeleter, MockUrlGetter, MockUrlSaver};

    #[tokio::test]
    async fn test_save_with_alias_success() {
        let mut mock_saver = MockUrlSaver::new();

        mock_saver
            .expect_create()
            .withf(|url, alias| url == "http://test.ru" && alias == "suc")
            .times(1)
            .returning(|_, _| Ok(42));

        let service = ResolutionService::new(Arc::new(mock_saver));

        let saved = service.save("http://test.ru", Some("suc")).await.unwrap();

        assert_eq!(saved.id, 42);
        assert_eq!(saved.alias, "suc");
    }

    #[tokio::test]
    async fn test_save_generates_alias_when_absent() {
        let mut mock_saver = MockUrlSaver::new();

        mock_saver
            .expect_create()
            .withf(|_, alias| alias.len() == 6 && alias.chars().all(|c| c.is_ascii_lowercase()))
            .times(1)
            .returning(|_, _| Ok(1));

        let service = ResolutionService::new(Arc::new(mock_saver));

        let saved = service.save("https://example.com", None).await.unwrap();

        assert_eq!(saved.alias.len(), 6);
    }

    #[tokio::test]
    async fn test_save_empty_alias_counts_as_absent() {
        let mut mock_saver = MockUrlSaver::new();

        mock_saver
            .expect_create()
            .withf(|_, alias| alias.len() == 8)
            .times(1)
            .returning(|_, _| Ok(1));

        let service =
            ResolutionService::new(Arc::new(mock_saver)).with_generator(AliasGenerator::new(8));

        let saved = service.save("https://example.com", Some("")).await.unwrap();

        assert_eq!(saved.alias.len(), 8);
    }

    #[tokio::test]
    async fn test_save_alias_conflict() {
        let mut mock_saver = MockUrlSaver::new();

        mock_saver
            .expect_create()
            .times(1)
            .returning(|_, alias| Err(StorageError::AliasConflict(alias.to_string())));

        let service = ResolutionService::new(Arc::new(mock_saver));

        let result = service.save("http://test.ru", Some("taken")).await;

        assert!(matches!(result.unwrap_err(), AppError::AliasAlreadyExists));
    }

    #[tokio::test]
    async fn test_save_generated_conflict_is_not_retried_by_default() {
        let mut mock_saver = MockUrlSaver::new();

        mock_saver
            .expect_create()
            .times(1)
            .returning(|_, alias| Err(StorageError::AliasConflict(alias.to_string())));

        let service = ResolutionService::new(Arc::new(mock_saver));

        let result = service.save("http://test.ru", None).await;

        assert!(matches!(result.unwrap_err(), AppError::AliasAlreadyExists));
    }

    #[tokio::test]
    async fn test_save_generated_conflict_retries_when_configured() {
        let mut mock_saver = MockUrlSaver::new();
        let mut calls = 0;

        mock_saver.expect_create().times(2).returning(move |_, alias| {
            calls += 1;
            if calls == 1 {
                Err(StorageError::AliasConflict(alias.to_string()))
            } else {
                Ok(9)
            }
        });

        let service = ResolutionService::new(Arc::new(mock_saver)).with_generation_attempts(3);

        let saved = service.save("http://test.ru", None).await.unwrap();

        assert_eq!(saved.id, 9);
    }

    #[tokio::test]
    async fn test_save_supplied_alias_is_never_retried() {
        let mut mock_saver = MockUrlSaver::new();

        mock_saver
            .expect_create()
            .times(1)
            .returning(|_, alias| Err(StorageError::AliasConflict(alias.to_string())));

        let service = ResolutionService::new(Arc::new(mock_saver)).with_generation_attempts(5);

        let result = service.save("http://test.ru", Some("mine")).await;

        assert!(matches!(result.unwrap_err(), AppError::AliasAlreadyExists));
    }

    #[tokio::test]
    async fn test_save_invalid_url() {
        let mut mock_saver = MockUrlSaver::new();
        mock_saver.expect_create().times(0);

        let service = ResolutionService::new(Arc::new(mock_saver));

        let err = service
            .save("URL_TestCannotSaveInvalidURL", Some("abc"))
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("url"));
        assert_eq!(err.to_string(), "field is not a valid URL. Field: url");
    }

    #[tokio::test]
    async fn test_save_empty_url() {
        let mut mock_saver = MockUrlSaver::new();
        mock_saver.expect_create().times(0);

        let service = ResolutionService::new(Arc::new(mock_saver));

        let err = service.save("", None).await.unwrap_err();

        assert_eq!(err.field(), Some("url"));
        assert_eq!(err.to_string(), "field is required. Field: url");
    }

    #[tokio::test]
    async fn test_save_url_with_control_characters() {
        let mut mock_saver = MockUrlSaver::new();
        mock_saver.expect_create().times(0);

        let service = ResolutionService::new(Arc::new(mock_saver));

        let err = service
            .save("http://test.ru/\nx", Some("abc"))
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("url"));
    }

    #[tokio::test]
    async fn test_save_invalid_alias() {
        let mut mock_saver = MockUrlSaver::new();
        mock_saver.expect_create().times(0);

        let service = ResolutionService::new(Arc::new(mock_saver));

        let err = service
            .save("http://test.ru", Some("a/b"))
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("alias"));
    }

    #[tokio::test]
    async fn test_save_storage_unavailable() {
        let mut mock_saver = MockUrlSaver::new();

        mock_saver
            .expect_create()
            .times(1)
            .returning(|_, _| Err(StorageError::Unavailable("connection reset".to_string())));

        let service = ResolutionService::new(Arc::new(mock_saver));

        let err = service.save("http://test.ru", Some("abc")).await.unwrap_err();

        assert!(matches!(err, AppError::StorageUnavailable));
        assert!(!err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_redirect_success() {
        let mut mock_getter = MockUrlGetter::new();

        mock_getter
            .expect_get_by_alias()
            .withf(|alias| alias == "suc")
            .times(1)
            .returning(|_| Ok("http://test.ru".to_string()));

        let service = ResolutionService::new(Arc::new(mock_getter));

        assert_eq!(service.redirect("suc").await.unwrap(), "http://test.ru");
    }

    #[tokio::test]
    async fn test_redirect_not_found() {
        let mut mock_getter = MockUrlGetter::new();

        mock_getter
            .expect_get_by_alias()
            .times(1)
            .returning(|_| Err(StorageError::NotFound));

        let service = ResolutionService::new(Arc::new(mock_getter));

        let err = service.redirect("missing").await.unwrap_err();

        assert!(matches!(err, AppError::NoUrlForAlias));
    }

    #[tokio::test]
    async fn test_redirect_empty_alias() {
        let mut mock_getter = MockUrlGetter::new();
        mock_getter.expect_get_by_alias().times(0);

        let service = ResolutionService::new(Arc::new(mock_getter));

        let err = service.redirect("").await.unwrap_err();

        assert!(matches!(err, AppError::EmptyAlias));
    }

    #[tokio::test]
    async fn test_redirect_timeout() {
        let mut mock_getter = MockUrlGetter::new();

        mock_getter
            .expect_get_by_alias()
            .times(1)
            .returning(|_| Err(StorageError::Timeout("3s elapsed".to_string())));

        let service = ResolutionService::new(Arc::new(mock_getter));

        let err = service.redirect("suc").await.unwrap_err();

        assert!(matches!(err, AppError::StorageUnavailable));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mut mock_deleter = MockUrlDeleter::new();

        mock_deleter
            .expect_delete_by_alias()
            .withf(|alias| alias == "suc")
            .times(1)
            .returning(|_| Ok(17));

        let service = ResolutionService::new(Arc::new(mock_deleter));

        let deleted = service.delete("suc").await.unwrap();

        assert_eq!(deleted.id, 17);
        assert_eq!(deleted.alias, "suc");
    }

    #[tokio::test]
    async fn test_delete_nothing_to_delete() {
        let mut mock_deleter = MockUrlDeleter::new();

        mock_deleter
            .expect_delete_by_alias()
            .times(1)
            .returning(|_| Err(StorageError::NotFound));

        let service = ResolutionService::new(Arc::new(mock_deleter));

        let err = service.delete("ghost").await.unwrap_err();

        assert!(matches!(err, AppError::NothingToDelete));
    }

    #[tokio::test]
    async fn test_delete_empty_alias() {
        let mut mock_deleter = MockUrlDeleter::new();
        mock_deleter.expect_delete_by_alias().times(0);

        let service = ResolutionService::new(Arc::new(mock_deleter));

        let err = service.delete("").await.unwrap_err();

        assert!(matches!(err, AppError::EmptyAlias));
    }
}
