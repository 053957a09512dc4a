//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! # Register a user without going through the dashboard
//! stockroom user create -u alice -p 'correct horse'
//!
//! # List registered usernames
//! stockroom user list
//! ```

use std::sync::Arc;

use secrecy::SecretString;
use stockroom_admin::db::{KeyValueStore, UserRepository};
use stockroom_admin::services::AccountDirectory;
use stockroom_core::Username;

use super::CommandError;

/// Register a new user.
///
/// # Errors
///
/// Returns `CommandError::Repository` if the stored users cannot be read,
/// or `CommandError::Auth` if either field is empty or the username is
/// taken.
pub fn create(
    store: Arc<dyn KeyValueStore>,
    username: &str,
    password: &SecretString,
) -> Result<Username, CommandError> {
    // Refuse to write over a users file we cannot parse.
    UserRepository::new(store.as_ref()).load()?;

    let mut accounts = AccountDirectory::load(store);
    let username = accounts.register(username, password)?;
    tracing::info!("User created: {}", username);
    Ok(username)
}

/// List registered usernames in registration order.
///
/// Unlike the dashboard, unreadable data is reported instead of being
/// treated as empty.
///
/// # Errors
///
/// Returns `CommandError::Repository` if the stored users cannot be read.
pub fn list(store: &dyn KeyValueStore) -> Result<Vec<Username>, CommandError> {
    let users = UserRepository::new(store).load()?;
    Ok(users.into_iter().map(|u| u.username).collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stockroom_admin::db::MemoryStore;

    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[test]
    fn test_create_then_list() {
        let store = Arc::new(MemoryStore::new());
        create(store.clone(), "alice", &secret("pw")).unwrap();
        create(store.clone(), "bob", &secret("pw")).unwrap();

        let names: Vec<String> = list(store.as_ref())
            .unwrap()
            .into_iter()
            .map(Username::into_inner)
            .collect();
        assert_eq!(names, ["alice", "bob"]);
    }

    #[test]
    fn test_create_duplicate() {
        let store = Arc::new(MemoryStore::new());
        create(store.clone(), "alice", &secret("pw")).unwrap();
        let err = create(store, "alice", &secret("pw")).unwrap_err();
        assert_eq!(err.to_string(), "user already exists");
    }

    #[test]
    fn test_list_reports_corrupt_data() {
        let store = MemoryStore::with_entries([("users", "oops")]);
        assert!(matches!(
            list(&store),
            Err(CommandError::Repository(_))
        ));
    }

    #[test]
    fn test_create_keeps_corrupt_data() {
        let store = Arc::new(MemoryStore::with_entries([("users", "oops")]));
        assert!(matches!(
            create(store.clone(), "alice", &secret("pw")),
            Err(CommandError::Repository(_))
        ));
        assert_eq!(store.get("users").unwrap().as_deref(), Some("oops"));
    }
}
