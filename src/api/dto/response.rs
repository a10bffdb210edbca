//! Status field shared by every JSON response.

/// `status` value of a successful response.
pub const STATUS_OK: &str = "OK";

/// `status` value of an error response; see [`crate::error::AppError`].
pub const STATUS_ERROR: &str = "Error";
