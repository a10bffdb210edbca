//! DTOs for the delete endpoint.

use serde::Serialize;

/// Body returned after a record is removed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub status: &'static str,
    pub alias: String,
    pub deleted_id: i64,
}
