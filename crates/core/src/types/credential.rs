//! Stored password types.
//!
//! Type-safe wrapper for password hashes as they sit in the user store.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A password hash in PHC string format (e.g. `$argon2id$v=19$...`).
///
/// The core crate never inspects the contents; hashing and verification
/// live in the admin crate's auth service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap an encoded hash.
    #[must_use]
    pub const fn new(phc: String) -> Self {
        Self(phc)
    }

    /// Get the encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest([REDACTED])")
    }
}

impl AsRef<str> for PasswordDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for PasswordDigest {
    fn from(phc: String) -> Self {
        Self(phc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_hash() {
        let digest = PasswordDigest::new("$argon2id$v=19$secretstuff".to_owned());
        let debug = format!("{digest:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secretstuff"));
    }
}
