use std::sync::Arc;

use crate::api::middleware::auth::Credentials;
use crate::application::services::ResolutionService;
use crate::domain::repositories::UrlRepository;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub resolution_service: Arc<ResolutionService<dyn UrlRepository>>,
    pub credentials: Arc<Credentials>,
}

impl AppState {
    pub fn new(
        resolution_service: ResolutionService<dyn UrlRepository>,
        credentials: Credentials,
    ) -> Self {
        Self {
            resolution_service: Arc::new(resolution_service),
            credentials: Arc::new(credentials),
        }
    }
}
