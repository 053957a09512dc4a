//! Persistence for the admin dashboard.
//!
//! # Storage: key-value, string-valued
//!
//! Each collection is stored whole under one key and rewritten in full after
//! every mutation:
//!
//! ## Keys
//!
//! - `users` - JSON array of registered users (username + password hash)
//! - `inventory` - JSON array of product records, in insertion order
//!
//! A missing key reads as an empty collection. There is no versioning and no
//! migration step.
//!
//! # Backends
//!
//! - [`FileStore`] - one `<key>.json` file per key inside a data directory
//! - [`MemoryStore`] - a process-local map, used by tests

pub mod file_store;
pub mod inventory;
pub mod memory_store;
pub mod users;

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file_store::FileStore;
pub use inventory::InventoryRepository;
pub use memory_store::MemoryStore;
pub use users::UserRepository;

/// Storage keys.
pub mod keys {
    /// Key holding the serialized user collection.
    pub const USERS: &str = "users";

    /// Key holding the serialized inventory collection.
    pub const INVENTORY: &str = "inventory";
}

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters that cannot be stored.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage backend failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Stored value could not be parsed.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Collection could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String-valued key-value storage.
///
/// Implementations are synchronous: reads happen once at startup and writes
/// complete before the triggering action returns.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Read a whole collection stored under `key`.
///
/// A missing key yields an empty collection.
fn load_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, RepositoryError> {
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };

    serde_json::from_str(&raw)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid {key} collection: {e}")))
}

/// Replace the whole collection stored under `key`.
fn save_collection<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), RepositoryError> {
    let raw = serde_json::to_string(items)?;
    store.set(key, &raw)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_loads_empty() {
        let store = MemoryStore::new();
        let items: Vec<String> = load_collection(&store, "absent").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_unparseable_value_is_corruption() {
        let store = MemoryStore::new();
        store.set("things", "{not json").unwrap();
        let result: Result<Vec<String>, _> = load_collection(&store, "things");
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }

    #[test]
    fn test_wrong_shape_is_corruption() {
        let store = MemoryStore::new();
        store.set("things", r#"{"a": 1}"#).unwrap();
        let result: Result<Vec<String>, _> = load_collection(&store, "things");
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let items = vec!["a".to_owned(), "b".to_owned()];
        save_collection(&store, "things", &items).unwrap();
        let loaded: Vec<String> = load_collection(&store, "things").unwrap();
        assert_eq!(loaded, items);
    }
}
