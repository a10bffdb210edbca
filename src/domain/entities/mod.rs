//! Core domain entities.
//!
//! - [`UrlRecord`] - The sole persistent entity: `(id, alias, target_url)`
//! - [`SavedUrl`] - Outcome of a successful save
//! - [`DeletedUrl`] - Outcome of a successful delete
//!
//! Records are never updated in place; they are created and deleted.

pub mod url_record;

pub use url_record::{DeletedUrl, SavedUrl, UrlRecord};
