//! Domain layer containing the URL record model and the storage contract.
//!
//! This module is independent of HTTP and of any particular database. It defines:
//!
//! - [`entities`] - The persisted URL record and the results of save/delete
//! - [`errors`] - The closed error vocabulary every storage backend speaks
//! - [`repositories`] - Narrow storage capability traits
//!
//! # Design Principles
//!
//! - Storage implementations live in [`crate::infrastructure::persistence`]
//! - Only [`crate::application::services::ResolutionService`] interprets
//!   [`errors::StorageError`]; layers above it see [`crate::error::AppError`]

pub mod entities;
pub mod errors;
pub mod repositories;
