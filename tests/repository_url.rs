use alias_shortener::domain::errors::StorageError;
use alias_shortener::domain::repositories::{UrlDeleter, UrlGetter, UrlRepository, UrlSaver};
use alias_shortener::infrastructure::persistence::PgUrlRepository;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

#[sqlx::test]
async fn test_create_and_get(pool: PgPool) {
    let repo = PgUrlRepository::new(pool);

    let id = repo.create("http://test.ru", "suc").await.unwrap();

    assert!(id > 0);
    assert_eq!(repo.get_by_alias("suc").await.unwrap(), "http://test.ru");
}

#[sqlx::test]
async fn test_duplicate_alias_conflicts(pool: PgPool) {
    let repo = PgUrlRepository::new(pool);
    repo.create("http://qwe.ru", "dup").await.unwrap();

    let result = repo.create("http://other.io", "dup").await;

    assert_eq!(result, Err(StorageError::AliasConflict("dup".to_string())));
    assert_eq!(repo.get_by_alias("dup").await.unwrap(), "http://qwe.ru");
}

#[sqlx::test]
async fn test_get_missing_alias(pool: PgPool) {
    let repo = PgUrlRepository::new(pool);

    assert_eq!(
        repo.get_by_alias("missing").await,
        Err(StorageError::NotFound)
    );
}

#[sqlx::test]
async fn test_delete_returns_id(pool: PgPool) {
    let repo = PgUrlRepository::new(pool);
    let id = repo.create("https://example.com", "gone").await.unwrap();

    assert_eq!(repo.delete_by_alias("gone").await.unwrap(), id);
    assert_eq!(
        repo.delete_by_alias("gone").await,
        Err(StorageError::NotFound)
    );
}

#[sqlx::test]
async fn test_get_id_by_url_returns_oldest(pool: PgPool) {
    let repo = PgUrlRepository::new(pool);
    let first = repo.create("https://shared.example", "one").await.unwrap();
    repo.create("https://shared.example", "two").await.unwrap();

    assert_eq!(
        repo.get_id_by_url("https://shared.example").await.unwrap(),
        first
    );
}

#[sqlx::test]
async fn test_truncate_and_ping(pool: PgPool) {
    let repo = PgUrlRepository::new(pool);
    repo.create("https://example.com", "a").await.unwrap();

    repo.truncate().await.unwrap();

    assert_eq!(repo.get_by_alias("a").await, Err(StorageError::NotFound));
    assert!(repo.ping().await.is_ok());
}

#[sqlx::test]
async fn test_bootstrap_is_idempotent(pool: PgPool) {
    let repo = PgUrlRepository::new(pool);

    repo.bootstrap().await.unwrap();
    repo.bootstrap().await.unwrap();

    repo.create("https://example.com", "after").await.unwrap();
}

#[sqlx::test]
async fn test_concurrent_creates_single_winner(pool: PgPool) {
    let repo = Arc::new(PgUrlRepository::new(pool));
    let mut handles = Vec::new();

    for i in 0..16 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.create(&format!("https://example.com/{i}"), "race")
                .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(StorageError::AliasConflict(_)) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);
}

#[sqlx::test]
async fn test_query_deadline(pool: PgPool) {
    let repo = PgUrlRepository::new(pool.clone()).with_query_timeout(Duration::from_millis(50));

    let mut lock = pool.begin().await.unwrap();
    sqlx::query("LOCK TABLE url IN ACCESS EXCLUSIVE MODE")
        .execute(&mut *lock)
        .await
        .unwrap();

    let result = repo.get_by_alias("blocked").await;

    assert!(matches!(result, Err(StorageError::Timeout(_))));
    lock.rollback().await.unwrap();
}
