//! HTTP Basic authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;
use std::fmt;
use subtle::{Choice, ConstantTimeEq};
use tracing::warn;

use crate::{error::AppError, state::AppState};

/// The single user allowed to modify records.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Compares both parts in constant time, without revealing their lengths.
    pub fn verify(&self, username: &str, password: Option<&str>) -> bool {
        let user_ok = constant_time_compare(&self.username, username);
        let password_ok = constant_time_compare(&self.password, password.unwrap_or(""));
        (user_ok & password_ok).into()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Both sides are padded to the longer length with different fill bytes, so a
/// length mismatch costs as much as a content mismatch.
fn constant_time_compare(expected: &str, given: &str) -> Choice {
    let max_len = expected.len().max(given.len());

    let mut expected_padded = vec![0u8; max_len];
    let mut given_padded = vec![0xFFu8; max_len];

    expected_padded[..expected.len()].copy_from_slice(expected.as_bytes());
    given_padded[..given.len()].copy_from_slice(given.as_bytes());

    expected.len().ct_eq(&given.len()) & expected_padded.ct_eq(&given_padded)
}

/// Authenticates requests using HTTP Basic credentials.
///
/// # Header Format
///
/// ```text
/// Authorization: Basic base64(<user>:<password>)
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Basic` if the header
/// is missing, malformed, or carries the wrong credentials.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/url", post(save_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBasic((username, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            warn!(uri = %parts.uri, "missing or malformed basic credentials");
            AppError::Unauthorized
        })?;

    if !st.credentials.verify(&username, password.as_deref()) {
        warn!(user = %username, uri = %parts.uri, "rejected basic credentials");
        return Err(AppError::Unauthorized);
    }

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
