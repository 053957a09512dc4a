//! Accounts and inventory behind the dashboard.
//!
//! A [`Workbench`] owns the account directory and the inventory. The web
//! process keeps one behind a mutex, so every method runs to completion,
//! persistence included, before the next one starts. Who is signed in is
//! tracked per browser session by the routes, not here.

use std::sync::Arc;

use secrecy::SecretString;

use stockroom_core::{Product, ProductDraft, ProductId, Username};

use super::auth::{AccountDirectory, AuthError};
use super::inventory::{InventoryError, InventoryStore};
use crate::db::KeyValueStore;

/// Accounts and inventory for one running dashboard.
pub struct Workbench {
    accounts: AccountDirectory,
    inventory: InventoryStore,
}

impl Workbench {
    /// Load both collections from `store`.
    #[must_use]
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            accounts: AccountDirectory::load(Arc::clone(&store)),
            inventory: InventoryStore::load(store),
        }
    }

    /// Registered accounts.
    #[must_use]
    pub const fn accounts(&self) -> &AccountDirectory {
        &self.accounts
    }

    /// The inventory.
    #[must_use]
    pub const fn inventory(&self) -> &InventoryStore {
        &self.inventory
    }

    /// See [`AccountDirectory::register`].
    ///
    /// # Errors
    ///
    /// Propagates the `AuthError`.
    pub fn register(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> Result<Username, AuthError> {
        self.accounts.register(username, password)
    }

    /// See [`AccountDirectory::login`].
    ///
    /// # Errors
    ///
    /// Propagates the `AuthError`.
    pub fn login(&self, username: &str, password: &SecretString) -> Result<Username, AuthError> {
        self.accounts.login(username, password)
    }

    /// Record that `username` signed out.
    ///
    /// Closes any open removal prompt, so the next sign-in starts clean.
    pub fn logout(&mut self, username: &Username) {
        tracing::info!(username = %username, "User logged out");
        self.inventory.cancel_remove();
    }

    /// See [`InventoryStore::add`].
    ///
    /// # Errors
    ///
    /// Propagates the `InventoryError`.
    pub fn add_product(&mut self, draft: &ProductDraft) -> Result<ProductId, InventoryError> {
        self.inventory.add(draft)
    }

    /// See [`InventoryStore::request_remove_id`].
    ///
    /// # Errors
    ///
    /// Propagates the `InventoryError`.
    pub fn request_remove(&mut self, id: ProductId) -> Result<(), InventoryError> {
        self.inventory.request_remove_id(id)
    }

    /// See [`InventoryStore::confirm_remove`].
    ///
    /// # Errors
    ///
    /// Propagates the `InventoryError`.
    pub fn confirm_remove(&mut self) -> Result<Product, InventoryError> {
        self.inventory.confirm_remove()
    }

    /// See [`InventoryStore::cancel_remove`].
    pub fn cancel_remove(&mut self) {
        self.inventory.cancel_remove();
    }
}
