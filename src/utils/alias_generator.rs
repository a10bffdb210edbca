//! Alias generation and validation.
//!
//! Generated aliases are lowercase ASCII letters drawn uniformly per position.
//! The generator never consults storage; uniqueness is decided by the store
//! when the record is created.

use rand::Rng;

use crate::error::AppError;

/// Length used when no length (or zero) is configured.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Upper bound for both generated and caller-supplied aliases.
pub const MAX_ALIAS_LENGTH: usize = 64;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Aliases that would shadow fixed routes.
const RESERVED_ALIASES: &[&str] = &["url", "health"];

/// Produces random lowercase aliases of a fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasGenerator {
    length: usize,
}

impl AliasGenerator {
    /// Creates a generator; a `length` of zero falls back to [`DEFAULT_ALIAS_LENGTH`].
    pub fn new(length: usize) -> Self {
        let length = if length == 0 {
            DEFAULT_ALIAS_LENGTH
        } else {
            length.min(MAX_ALIAS_LENGTH)
        };
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Generates a fresh alias.
    ///
    /// # Examples
    ///
    /// ```
    /// use alias_shortener::utils::alias_generator::AliasGenerator;
    ///
    /// let alias = AliasGenerator::default().generate();
    /// assert_eq!(alias.len(), 6);
    /// assert!(alias.chars().all(|c| c.is_ascii_lowercase()));
    /// ```
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();

        (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for AliasGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ALIAS_LENGTH)
    }
}

/// Validates a caller-supplied alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - No `/`, `?`, `#`, whitespace or control characters, so the alias stays a
///   single path segment
/// - Not a reserved route name
///
/// Case is preserved and significant.
///
/// # Errors
///
/// Returns [`AppError::ValidationFailed`] on field `alias`.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() {
        return Err(AppError::required("alias"));
    }

    if alias.chars().count() > MAX_ALIAS_LENGTH {
        return Err(AppError::invalid_alias("alias"));
    }

    if alias
        .chars()
        .any(|c| matches!(c, '/' | '?' | '#') || c.is_whitespace() || c.is_control())
    {
        return Err(AppError::invalid_alias("alias"));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::invalid_alias("alias"));
    }

    Ok(())
}
