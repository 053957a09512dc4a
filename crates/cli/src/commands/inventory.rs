//! Inventory commands.
//!
//! # Usage
//!
//! ```bash
//! stockroom inventory list
//! stockroom inventory add --name Widget --description "A widget" \
//!     --category Tools --price 9.99 --quantity 3
//! stockroom inventory remove 0
//! stockroom inventory stats
//! ```

use std::sync::Arc;

use stockroom_admin::db::{InventoryRepository, KeyValueStore};
use stockroom_admin::services::InventoryStore;
use stockroom_core::{InventoryStats, Product, ProductDraft};

use super::CommandError;

/// Load every product in stored order.
///
/// # Errors
///
/// Returns `CommandError::Repository` if the stored inventory cannot be read.
pub fn list(store: &dyn KeyValueStore) -> Result<Vec<Product>, CommandError> {
    Ok(InventoryRepository::new(store).load()?)
}

/// Format one product as a listing row.
#[must_use]
pub fn format_row(index: usize, product: &Product) -> String {
    format!(
        "{index:>4}  {name}  [{category}]  {price} x {quantity} units",
        name = product.name,
        category = product.category,
        price = product.price,
        quantity = product.quantity,
    )
}

/// Validate and append a product.
///
/// # Errors
///
/// Returns `CommandError::Repository` if the stored inventory cannot be
/// read, or `CommandError::Inventory` if the draft is invalid or the
/// inventory cannot be saved.
pub fn add(store: Arc<dyn KeyValueStore>, draft: &ProductDraft) -> Result<usize, CommandError> {
    list(store.as_ref())?;
    let mut inventory = InventoryStore::load(store);
    inventory.add(draft)?;
    Ok(inventory.total_products())
}

/// Remove the product at `index`, shifting later products down.
///
/// # Errors
///
/// Returns `CommandError::Repository` if the stored inventory cannot be
/// read, or `CommandError::Inventory` if there is no such position or the
/// inventory cannot be saved.
pub fn remove(store: Arc<dyn KeyValueStore>, index: usize) -> Result<Product, CommandError> {
    list(store.as_ref())?;
    let mut inventory = InventoryStore::load(store);
    inventory.request_remove(index)?;
    let removed = inventory.confirm_remove()?;
    tracing::info!("Removed product at {}: {}", index, removed.name);
    Ok(removed)
}

/// Totals over the stored inventory.
///
/// # Errors
///
/// Returns `CommandError::Repository` if the stored inventory cannot be read.
pub fn stats(store: &dyn KeyValueStore) -> Result<InventoryStats, CommandError> {
    let products = list(store)?;
    Ok(InventoryStats::from_products(&products))
}
