//! Repository for product records.
//!
//! Records are stored in insertion order with no identifiers; position in the
//! array is the only ordering.

use stockroom_core::Product;

use super::{KeyValueStore, RepositoryError, keys, load_collection, save_collection};

/// Reads and writes the `inventory` collection.
pub struct InventoryRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> InventoryRepository<'a> {
    /// Create a new inventory repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Load every product record in stored order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored value is not a
    /// valid product list, or `RepositoryError::Store` if it cannot be read.
    pub fn load(&self) -> Result<Vec<Product>, RepositoryError> {
        load_collection(self.store, keys::INVENTORY)
    }

    /// Replace the stored product list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the list cannot be encoded or written.
    pub fn save<'p>(
        &self,
        products: impl IntoIterator<Item = &'p Product>,
    ) -> Result<(), RepositoryError> {
        let products: Vec<&Product> = products.into_iter().collect();
        save_collection(self.store, keys::INVENTORY, &products)
    }
}
