use thiserror::Error;

/// Failures reported by [`HashTable`](crate::HashTable).
///
/// A failed operation leaves the table exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// No entry with this key exists in the key's bucket. `key` holds the
    /// key's `Display` text.
    #[error("key not found: {key:?}")]
    KeyNotFound { key: String },
    #[error("hash table size must be nonzero")]
    ZeroTableSize,
}
