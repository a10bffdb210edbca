//! API route configuration.
//!
//! Every route here requires HTTP Basic authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{delete_handler, save_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, post},
};

/// Routes that modify records.
///
/// # Endpoints
///
/// - `POST   /url`          - Store a URL under a supplied or generated alias
/// - `DELETE /url/{alias}`  - Remove the record stored under an alias
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/url", post(save_handler))
        .route("/url/{alias}", delete(delete_handler))
}
