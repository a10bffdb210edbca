//! URL record entity mapping an alias to its target URL.

/// A stored alias → URL mapping.
///
/// `id` is assigned by the store on creation and only ever returned to callers,
/// never used as a lookup key. `alias` is unique and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub alias: String,
    pub target_url: String,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(id: i64, alias: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            id,
            alias: alias.into(),
            target_url: target_url.into(),
        }
    }
}

/// Result of a successful save: the alias actually used (supplied or generated)
/// and the identifier the store assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedUrl {
    pub id: i64,
    pub alias: String,
}

/// Result of a successful delete: the former identifier of the removed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedUrl {
    pub id: i64,
    pub alias: String,
}
