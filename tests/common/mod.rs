#![allow(dead_code)]

use alias_shortener::api::middleware::auth::Credentials;
use alias_shortener::application::services::ResolutionService;
use alias_shortener::domain::repositories::UrlRepository;
use alias_shortener::infrastructure::persistence::InMemoryUrlRepository;
use alias_shortener::routes::router;
use alias_shortener::state::AppState;
use axum_test::TestServer;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::sync::Arc;
use std::time::Duration;

pub const HTTP_USER: &str = "localuser";
pub const HTTP_PASSWORD: &str = "password";

pub fn create_test_state(storage: Arc<dyn UrlRepository>) -> AppState {
    AppState::new(
        ResolutionService::new(storage),
        Credentials::new(HTTP_USER, HTTP_PASSWORD),
    )
}

/// Server over an empty in-memory repository, plus a handle to that repository.
pub fn create_test_server() -> (TestServer, Arc<InMemoryUrlRepository>) {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let storage: Arc<dyn UrlRepository> = repo.clone();

    let app = router(create_test_state(storage), Duration::from_secs(4));

    (TestServer::new(app).unwrap(), repo)
}

pub fn basic_auth(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

pub fn valid_auth() -> String {
    basic_auth(HTTP_USER, HTTP_PASSWORD)
}
