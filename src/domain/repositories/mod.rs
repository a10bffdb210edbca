//! Storage capability traits for the domain layer.
//!
//! Each trait covers one capability so a consumer depends only on what it uses:
//!
//! - [`UrlSaver`] - create a record
//! - [`UrlGetter`] - resolve an alias
//! - [`UrlDeleter`] - remove a record by alias
//! - [`UrlRepository`] - all of the above plus maintenance operations
//!
//! Implementations live in `crate::infrastructure::persistence`. Mock
//! implementations of the narrow traits are generated via `mockall` for tests.

pub mod url_repository;

pub use url_repository::{UrlDeleter, UrlGetter, UrlRepository, UrlSaver};

#[cfg(test)]
pub use url_repository::{MockUrlDeleter, MockUrlGetter, MockUrlSaver};
