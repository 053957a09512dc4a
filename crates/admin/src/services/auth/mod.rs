//! Account directory.
//!
//! Holds every registered user in memory and writes the whole list back to
//! the `users` key after each registration. Passwords are stored as salted
//! Argon2 hashes and never kept in plain text.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};

use stockroom_core::{PasswordDigest, UserRecord, Username};

use crate::db::{KeyValueStore, UserRepository};

/// Registered users and the store they persist to.
pub struct AccountDirectory {
    users: Vec<UserRecord>,
    store: Arc<dyn KeyValueStore>,
}

impl AccountDirectory {
    /// Load the directory from `store`.
    ///
    /// A missing or unreadable `users` value yields an empty directory.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let users = match UserRepository::new(store.as_ref()).load() {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load users, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = users.len(), "Loaded users");

        Self { users, store }
    }

    /// Registered users in registration order.
    #[must_use]
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` if nobody has registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Register a new user.
    ///
    /// The user is persisted before being added in memory, so a failed write
    /// leaves the directory unchanged.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` or `AuthError::EmptyPassword` for
    /// blank input, `AuthError::UserAlreadyExists` if the username is taken,
    /// or `AuthError::Repository` if the directory cannot be saved.
    pub fn register(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> Result<Username, AuthError> {
        let username = Username::parse(username)?;
        if password.expose_secret().is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        if self.find(&username).is_some() {
            tracing::warn!(username = %username, "Registration rejected: username taken");
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(password.expose_secret())?;

        let mut users = self.users.clone();
        users.push(UserRecord {
            username: username.clone(),
            password_hash,
        });
        UserRepository::new(self.store.as_ref()).save(&users)?;
        self.users = users;

        tracing::info!(username = %username, "User registered");
        Ok(username)
    }

    /// Check a username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the user is unknown or the
    /// password does not match.
    pub fn login(&self, username: &str, password: &SecretString) -> Result<Username, AuthError> {
        let user = Username::parse(username)
            .ok()
            .and_then(|name| self.find(&name))
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password.expose_secret(), &user.password_hash)?;

        tracing::info!(username = %user.username, "User logged in");
        Ok(user.username.clone())
    }

    fn find(&self, username: &Username) -> Option<&UserRecord> {
        self.users.iter().find(|u| &u.username == username)
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> Result<PasswordDigest, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordDigest::new(hash.to_string()))
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &PasswordDigest) -> Result<(), AuthError> {
    let parsed_hash =
        PasswordHash::new(hash.as_str()).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
