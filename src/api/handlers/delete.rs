//! Handler for alias deletion.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::api::dto::delete::DeleteResponse;
use crate::api::dto::response::STATUS_OK;
use crate::api::handlers::redirect::reject_path;
use crate::error::AppError;
use crate::state::AppState;

/// Removes the record stored under an alias.
///
/// # Endpoint
///
/// `DELETE /url/{alias}` (Basic auth)
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "ex", "deletedId": 7 }
/// ```
///
/// # Errors
///
/// Returns 404 if nothing is stored under the alias, 400 if the path segment
/// does not decode to UTF-8.
pub async fn delete_handler(
    alias: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    let Path(alias) = alias.map_err(reject_path)?;

    let deleted = state.resolution_service.delete(&alias).await?;

    Ok(Json(DeleteResponse {
        status: STATUS_OK,
        alias: deleted.alias,
        deleted_id: deleted.id,
    }))
}
