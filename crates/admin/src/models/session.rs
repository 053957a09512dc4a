//! Session-related types for dashboard authentication.
//!
//! Each browser gets its own session. Sessions live in memory only, so every
//! process start begins signed out on the login view.

use serde::{Deserialize, Serialize};

use stockroom_core::Username;

/// Which form a signed-out visitor sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuthView {
    /// Username/password login form.
    #[default]
    Login,
    /// New account form.
    Register,
}

/// Session-stored identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Username the user logged in with.
    pub username: Username,
}

/// Session keys for dashboard state.
pub mod keys {
    /// Key for the signed-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the form shown to a signed-out visitor.
    pub const AUTH_VIEW: &str = "auth_view";

    /// Key for the notice shown on the next rendered page.
    pub const NOTICE: &str = "notice";
}
