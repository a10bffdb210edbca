//! Handler for alias redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};

use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its stored URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// The alias is matched exactly, case included. The stored URL is sent back
/// untouched in `Location` with `302 Found`.
///
/// # Errors
///
/// Returns 404 if nothing is stored under the alias, 400 if the path segment
/// does not decode to UTF-8.
pub async fn redirect_handler(
    alias: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let Path(alias) = alias.map_err(reject_path)?;

    let target_url = state.resolution_service.redirect(&alias).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target_url)]))
}

/// Maps an undecodable alias segment to [`AppError::InvalidRequest`].
pub(crate) fn reject_path(rejection: PathRejection) -> AppError {
    warn!(error = %rejection, "failed to decode alias from path");
    AppError::InvalidRequest
}
