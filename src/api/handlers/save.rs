//! Handler for the save endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::warn;
use validator::Validate;

use crate::api::dto::response::STATUS_OK;
use crate::api::dto::save::{SaveRequest, SaveResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Stores a URL under a supplied or generated alias.
///
/// # Endpoint
///
/// `POST /url` (Basic auth)
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "alias": "ex" }
/// ```
///
/// `alias` is optional; when absent or empty a random one is generated.
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "ex" }
/// ```
///
/// # Errors
///
/// - 400 if the body cannot be decoded or `url` is missing or malformed
/// - 409 if the alias is already taken
/// - 500 if storage fails
pub async fn save_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        warn!(error = %e, "failed to decode request body");
        AppError::InvalidRequest
    })?;

    payload.validate().map_err(|e| {
        let err = AppError::from(e);
        warn!(error = %err, "invalid request");
        err
    })?;

    let saved = state
        .resolution_service
        .save(&payload.url, payload.alias.as_deref())
        .await?;

    Ok(Json(SaveResponse {
        status: STATUS_OK,
        alias: saved.alias,
    }))
}
