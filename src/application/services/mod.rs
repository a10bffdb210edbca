//! Business logic services for the application layer.

pub mod resolution_service;

pub use resolution_service::ResolutionService;
