//! API-facing error taxonomy and its HTTP rendering.
//!
//! Every failure is rendered as `{"status": "Error", "error": "<message>"}`.
//! Storage failures are reduced to an opaque `internal error`; their detail is
//! logged where they are translated, in
//! [`crate::application::services::ResolutionService`].

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::api::dto::response::STATUS_ERROR;

pub const MSG_REQUIRED_FIELD: &str = "field is required. Field:";
pub const MSG_INVALID_URL: &str = "field is not a valid URL. Field:";
pub const MSG_INVALID_ALIAS: &str = "field is not a valid alias. Field:";
pub const MSG_UNEXPECTED_RULE: &str = "invalid field or unexpected rule. Field:";

/// Realm advertised in `WWW-Authenticate` on 401 responses.
pub const AUTH_REALM: &str = "url-shortener";

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected; `field` names the offending request field.
    #[error("{message}")]
    ValidationFailed { field: String, message: String },

    #[error("alias already exists")]
    AliasAlreadyExists,

    #[error("no url on this alias")]
    NoUrlForAlias,

    #[error("nothing to delete")]
    NothingToDelete,

    #[error("empty alias")]
    EmptyAlias,

    /// Opaque on purpose: the underlying storage error is logged, not returned.
    #[error("internal error")]
    StorageUnavailable,

    #[error("failed to decode request")]
    InvalidRequest,

    #[error("unauthorized")]
    Unauthorized,
}

impl AppError {
    pub fn required(field: &str) -> Self {
        Self::ValidationFailed {
            field: field.to_string(),
            message: format!("{MSG_REQUIRED_FIELD} {field}"),
        }
    }

    pub fn invalid_url(field: &str) -> Self {
        Self::ValidationFailed {
            field: field.to_string(),
            message: format!("{MSG_INVALID_URL} {field}"),
        }
    }

    pub fn invalid_alias(field: &str) -> Self {
        Self::ValidationFailed {
            field: field.to_string(),
            message: format!("{MSG_INVALID_ALIAS} {field}"),
        }
    }

    /// Returns the field a validation error refers to.
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::ValidationFailed { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationFailed { .. } | AppError::EmptyAlias | AppError::InvalidRequest => {
                StatusCode::BAD_REQUEST
            }
            AppError::AliasAlreadyExists => StatusCode::CONFLICT,
            AppError::NoUrlForAlias | AppError::NothingToDelete => StatusCode::NOT_FOUND,
            AppError::StorageUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            status: STATUS_ERROR,
            error: self.to_string(),
        });

        if matches!(self, AppError::Unauthorized) {
            let challenge = format!("Basic realm=\"{AUTH_REALM}\"");
            return (status, [(header::WWW_AUTHENTICATE, challenge)], body).into_response();
        }

        (status, body).into_response()
    }
}

/// Converts `validator` failures into one message per field, in field order.
///
/// A field that is both missing and malformed is only reported as missing.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut messages = Vec::with_capacity(fields.len());
        let mut first_field = None;

        for (field, field_errors) in fields {
            let field = field.to_string();
            let required = field_errors.iter().any(|e| e.code == "required");

            let prefix = if required {
                MSG_REQUIRED_FIELD
            } else {
                match field_errors.first().map(|e| e.code.as_ref()) {
                    Some("url") => MSG_INVALID_URL,
                    Some("alias") => MSG_INVALID_ALIAS,
                    _ => MSG_UNEXPECTED_RULE,
                }
            };

            messages.push(format!("{prefix} {field}"));
            first_field.get_or_insert(field);
        }

        AppError::ValidationFailed {
            field: first_field.unwrap_or_default(),
            message: messages.join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::required("url").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::AliasAlreadyExists.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::NoUrlForAlias.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::NothingToDelete.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::EmptyAlias.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::StorageUnavailable.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::invalid_url("url").to_string(),
            "field is not a valid URL. Field: url"
        );
        assert_eq!(
            AppError::required("url").to_string(),
            "field is required. Field: url"
        );
        assert_eq!(
            AppError::AliasAlreadyExists.to_string(),
            "alias already exists"
        );
        assert_eq!(AppError::NoUrlForAlias.to_string(), "no url on this alias");
        assert_eq!(AppError::StorageUnavailable.to_string(), "internal error");
    }

    #[test]
    fn test_field_only_for_validation() {
        assert_eq!(AppError::invalid_alias("alias").field(), Some("alias"));
        assert_eq!(AppError::EmptyAlias.field(), None);
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = AppError::Unauthorized.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"url-shortener\""
        );
    }
}
