//! Account directory error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username is empty.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] stockroom_core::UsernameError),

    /// Password is empty.
    #[error("password cannot be empty")]
    EmptyPassword,

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username is already taken.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Message shown to the user for this failure.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidUsername(_) | Self::EmptyPassword => "Please fill in all fields.",
            Self::InvalidCredentials => "Invalid credentials",
            Self::UserAlreadyExists => "Username already exists.",
            Self::Repository(_) | Self::PasswordHash => {
                "Something went wrong. Please try again."
            }
        }
    }
}
