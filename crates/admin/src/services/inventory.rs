//! Inventory store.
//!
//! Keeps the product list in insertion order, pairs each record with a
//! process-local [`ProductId`], and owns the removal confirmation prompt.
//!
//! # Removal
//!
//! Removal is two-step. [`InventoryStore::request_remove`] records the target
//! and opens the prompt; [`InventoryStore::confirm_remove`] deletes it and
//! [`InventoryStore::cancel_remove`] discards it. While the prompt is open
//! no product can be added and no other removal can be requested.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use stockroom_core::{InventoryStats, Product, ProductDraft, ProductId, ValidationError};

use crate::db::{InventoryRepository, KeyValueStore, RepositoryError};

/// Errors that can occur during inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The add-product draft failed validation.
    #[error("invalid product: {0}")]
    Validation(#[from] ValidationError),

    /// A removal prompt is already open.
    #[error("a removal is awaiting confirmation")]
    RemovalPending,

    /// No removal prompt is open.
    #[error("no removal is awaiting confirmation")]
    NoPendingRemoval,

    /// Position is past the end of the inventory.
    #[error("index {index} out of range for {len} products")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Current number of products.
        len: usize,
    },

    /// No product carries this id.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// Storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

impl InventoryError {
    /// Message shown to the user for this failure.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => ValidationError::USER_MESSAGE,
            Self::RemovalPending => "Please confirm or cancel the pending removal first.",
            Self::NoPendingRemoval => "There is no removal to confirm.",
            Self::IndexOutOfRange { .. } | Self::ProductNotFound(_) => {
                "That product no longer exists."
            }
            Self::Repository(_) => "Something went wrong. Please try again.",
        }
    }
}

/// A product held in memory together with its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    /// Process-local identifier.
    pub id: ProductId,
    /// The stored record.
    pub product: Product,
}

/// Ordered product list with write-through persistence.
pub struct InventoryStore {
    entries: Vec<InventoryEntry>,
    next_id: ProductId,
    pending_removal: Option<ProductId>,
    store: Arc<dyn KeyValueStore>,
}

impl InventoryStore {
    /// Load the inventory from `store`.
    ///
    /// A missing or unreadable `inventory` value yields an empty inventory.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let products = match InventoryRepository::new(store.as_ref()).load() {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load inventory, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = products.len(), "Loaded inventory");

        let mut inventory = Self {
            entries: Vec::with_capacity(products.len()),
            next_id: ProductId::new(1),
            pending_removal: None,
            store,
        };
        for product in products {
            let id = inventory.allocate_id();
            inventory.entries.push(InventoryEntry { id, product });
        }
        inventory
    }

    /// Products in display order.
    #[must_use]
    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    /// Iterate over the stored records in order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.entries.iter().map(|e| &e.product)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| &e.product)
    }

    /// Validate `draft` and append it.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::RemovalPending` while a removal prompt is
    /// open, `InventoryError::Validation` if the draft is invalid, or
    /// `InventoryError::Repository` if the inventory cannot be saved. The
    /// inventory is unchanged on every error.
    pub fn add(&mut self, draft: &ProductDraft) -> Result<ProductId, InventoryError> {
        if self.pending_removal.is_some() {
            return Err(InventoryError::RemovalPending);
        }

        let product = draft.validate().inspect_err(|e| {
            tracing::warn!(error = %e, "Product rejected");
        })?;

        let candidate = self
            .entries
            .iter()
            .map(|e| &e.product)
            .chain(std::iter::once(&product));
        InventoryRepository::new(self.store.as_ref()).save(candidate)?;

        let id = self.allocate_id();
        tracing::info!(
            product_id = %id,
            name = %product.name,
            quantity = product.quantity,
            "Product added"
        );
        self.entries.push(InventoryEntry { id, product });
        Ok(id)
    }

    /// Open the removal prompt for the product at `index`.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::RemovalPending` if a prompt is already open,
    /// or `InventoryError::IndexOutOfRange` if there is no such position.
    pub fn request_remove(&mut self, index: usize) -> Result<ProductId, InventoryError> {
        if self.pending_removal.is_some() {
            return Err(InventoryError::RemovalPending);
        }
        let id = self
            .entries
            .get(index)
            .map(|e| e.id)
            .ok_or(InventoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })?;

        self.pending_removal = Some(id);
        Ok(id)
    }

    /// Open the removal prompt for the product with `id`.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::RemovalPending` if a prompt is already open,
    /// or `InventoryError::ProductNotFound` if no product has this id.
    pub fn request_remove_id(&mut self, id: ProductId) -> Result<(), InventoryError> {
        if self.pending_removal.is_some() {
            return Err(InventoryError::RemovalPending);
        }
        if self.position(id).is_none() {
            return Err(InventoryError::ProductNotFound(id));
        }

        self.pending_removal = Some(id);
        Ok(())
    }

    /// Id of the product awaiting confirmation, if the prompt is open.
    #[must_use]
    pub const fn pending_removal(&self) -> Option<ProductId> {
        self.pending_removal
    }

    /// Delete the pending product and close the prompt.
    ///
    /// If the save fails the product is kept and the prompt stays open.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::NoPendingRemoval` if the prompt is closed,
    /// or `InventoryError::Repository` if the inventory cannot be saved.
    pub fn confirm_remove(&mut self) -> Result<Product, InventoryError> {
        let id = self
            .pending_removal
            .ok_or(InventoryError::NoPendingRemoval)?;

        let Some(index) = self.position(id) else {
            self.pending_removal = None;
            return Err(InventoryError::ProductNotFound(id));
        };

        let candidate = self
            .entries
            .iter()
            .filter(|e| e.id != id)
            .map(|e| &e.product);
        InventoryRepository::new(self.store.as_ref()).save(candidate)?;

        let removed = self.entries.remove(index).product;
        self.pending_removal = None;
        tracing::info!(product_id = %id, name = %removed.name, "Product removed");
        Ok(removed)
    }

    /// Close the prompt without removing anything.
    pub fn cancel_remove(&mut self) {
        if let Some(id) = self.pending_removal.take() {
            tracing::debug!(product_id = %id, "Removal cancelled");
        }
    }

    /// Number of product records.
    #[must_use]
    pub fn total_products(&self) -> usize {
        self.entries.len()
    }

    /// Sum of `price × quantity`, rounded to cents.
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.stats().total_value
    }

    /// Both totals at once.
    #[must_use]
    pub fn stats(&self) -> InventoryStats {
        InventoryStats::from_products(self.products())
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn allocate_id(&mut self) -> ProductId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::db::{MemoryStore, StoreError};

    fn draft(name: &str, price: &str, quantity: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_owned(),
            description: format!("{name} description"),
            category: "General".to_owned(),
            price: price.to_owned(),
            quantity: quantity.to_owned(),
        }
    }

    fn empty_inventory() -> (InventoryStore, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (InventoryStore::load(store.clone()), store)
    }

    fn names(inventory: &InventoryStore) -> Vec<&str> {
        inventory.products().map(|p| p.name.as_str()).collect()
    }

    /// Store whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        failing: AtomicBool,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::InvalidKey(key.to_owned()));
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_add_and_totals() {
        let (mut inventory, _) = empty_inventory();
        inventory.add(&draft("Widget", "9.99", "3")).unwrap();
        assert_eq!(inventory.total_products(), 1);
        assert_eq!(inventory.total_value(), Decimal::new(2997, 2));
        assert_eq!(inventory.stats().total_value_display(), "29.97");
    }

    #[test]
    fn test_empty_totals() {
        let (inventory, _) = empty_inventory();
        assert_eq!(inventory.total_products(), 0);
        assert_eq!(inventory.stats().total_value_display(), "0.00");
    }

    #[test]
    fn test_invalid_add_leaves_inventory_unchanged() {
        let (mut inventory, store) = empty_inventory();
        inventory.add(&draft("Keep", "1", "1")).unwrap();
        let before = store.get("inventory").unwrap();

        for bad in [
            draft("  ", "1", "1"),
            draft("X", "0", "1"),
            draft("X", "-2", "1"),
            draft("X", "abc", "1"),
            draft("X", "1", "0"),
            draft("X", "1", "many"),
        ] {
            let err = inventory.add(&bad).unwrap_err();
            assert!(matches!(err, InventoryError::Validation(_)));
            assert_eq!(err.user_message(), ValidationError::USER_MESSAGE);
        }

        assert_eq!(names(&inventory), ["Keep"]);
        assert_eq!(store.get("inventory").unwrap(), before);
    }

    #[test]
    fn test_remove_middle_shifts_later_entries() {
        let (mut inventory, _) = empty_inventory();
        for name in ["A", "B", "C"] {
            inventory.add(&draft(name, "1", "1")).unwrap();
        }

        inventory.request_remove(1).unwrap();
        let removed = inventory.confirm_remove().unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(names(&inventory), ["A", "C"]);

        inventory.request_remove(1).unwrap();
        inventory.confirm_remove().unwrap();
        assert_eq!(names(&inventory), ["A"]);
    }

    #[test]
    fn test_cancel_leaves_inventory_unchanged() {
        let (mut inventory, _) = empty_inventory();
        inventory.add(&draft("A", "1", "1")).unwrap();
        inventory.add(&draft("B", "1", "1")).unwrap();

        inventory.request_remove(0).unwrap();
        inventory.cancel_remove();
        assert_eq!(inventory.pending_removal(), None);
        assert_eq!(names(&inventory), ["A", "B"]);
    }

    #[test]
    fn test_cancel_without_prompt_is_noop() {
        let (mut inventory, _) = empty_inventory();
        inventory.cancel_remove();
        assert_eq!(inventory.pending_removal(), None);
    }

    #[test]
    fn test_request_out_of_range() {
        let (mut inventory, _) = empty_inventory();
        inventory.add(&draft("A", "1", "1")).unwrap();
        assert!(matches!(
            inventory.request_remove(1),
            Err(InventoryError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert_eq!(inventory.pending_removal(), None);
    }

    #[test]
    fn test_request_unknown_id() {
        let (mut inventory, _) = empty_inventory();
        let missing = ProductId::new(42);
        assert!(matches!(
            inventory.request_remove_id(missing),
            Err(InventoryError::ProductNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn test_confirm_without_prompt() {
        let (mut inventory, _) = empty_inventory();
        assert!(matches!(
            inventory.confirm_remove(),
            Err(InventoryError::NoPendingRemoval)
        ));
    }

    #[test]
    fn test_prompt_blocks_add_and_second_request() {
        let (mut inventory, _) = empty_inventory();
        let a = inventory.add(&draft("A", "1", "1")).unwrap();
        let b = inventory.add(&draft("B", "1", "1")).unwrap();

        inventory.request_remove_id(a).unwrap();
        assert!(matches!(
            inventory.add(&draft("C", "1", "1")),
            Err(InventoryError::RemovalPending)
        ));
        assert!(matches!(
            inventory.request_remove_id(b),
            Err(InventoryError::RemovalPending)
        ));
        assert_eq!(inventory.pending_removal(), Some(a));
        assert_eq!(inventory.total_products(), 2);
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let (mut inventory, _) = empty_inventory();
        let a = inventory.add(&draft("A", "1", "1")).unwrap();
        let b = inventory.add(&draft("B", "1", "1")).unwrap();
        assert_ne!(a, b);

        inventory.request_remove_id(a).unwrap();
        inventory.confirm_remove().unwrap();
        let c = inventory.add(&draft("C", "1", "1")).unwrap();
        assert_ne!(c, a);
        assert_eq!(inventory.get(b).unwrap().name, "B");
        assert!(inventory.get(a).is_none());
    }

    #[test]
    fn test_add_then_remove_sole_product_returns_to_zero() {
        let (mut inventory, _) = empty_inventory();
        inventory.add(&draft("Only", "4.50", "2")).unwrap();
        inventory.request_remove(0).unwrap();
        inventory.confirm_remove().unwrap();
        assert_eq!(inventory.total_products(), 0);
        assert_eq!(inventory.stats().total_value_display(), "0.00");
    }

    #[test]
    fn test_reload_yields_equal_records() {
        let (mut inventory, store) = empty_inventory();
        inventory.add(&draft("A", "1.10", "2")).unwrap();
        inventory.add(&draft("B", "3", "7")).unwrap();

        let reloaded = InventoryStore::load(store);
        assert_eq!(
            reloaded.products().collect::<Vec<_>>(),
            inventory.products().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_corrupt_inventory_loads_empty() {
        let store = Arc::new(MemoryStore::with_entries([("inventory", "[{\"name\":1}]")]));
        assert_eq!(InventoryStore::load(store).total_products(), 0);
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let store = Arc::new(FlakyStore::default());
        let mut inventory = InventoryStore::load(store.clone());
        inventory.add(&draft("A", "1", "1")).unwrap();

        store.failing.store(true, Ordering::SeqCst);
        assert!(matches!(
            inventory.add(&draft("B", "1", "1")),
            Err(InventoryError::Repository(_))
        ));
        assert_eq!(names(&inventory), ["A"]);

        let id = inventory.request_remove(0).unwrap();
        assert!(matches!(
            inventory.confirm_remove(),
            Err(InventoryError::Repository(_))
        ));
        assert_eq!(names(&inventory), ["A"]);
        assert_eq!(inventory.pending_removal(), Some(id));

        store.failing.store(false, Ordering::SeqCst);
        inventory.confirm_remove().unwrap();
        assert_eq!(inventory.total_products(), 0);
    }
}
