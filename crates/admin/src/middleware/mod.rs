//! Request extractors and session handling for the dashboard.

pub mod auth;
pub mod session;

pub use auth::{AuthRejection, RequireAuth, clear_session, current_user, set_current_user};
pub use session::{
    SESSION_COOKIE_NAME, auth_view, create_session_layer, set_auth_view, set_notice, take_notice,
};
