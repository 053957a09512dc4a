//! Repository for registered users.

use stockroom_core::UserRecord;

use super::{KeyValueStore, RepositoryError, keys, load_collection, save_collection};

/// Reads and writes the `users` collection.
pub struct UserRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Load every registered user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored value is not a
    /// valid user list, or `RepositoryError::Store` if it cannot be read.
    pub fn load(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        load_collection(self.store, keys::USERS)
    }

    /// Replace the stored user list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the list cannot be encoded or written.
    pub fn save(&self, users: &[UserRecord]) -> Result<(), RepositoryError> {
        save_collection(self.store, keys::USERS, users)
    }
}
