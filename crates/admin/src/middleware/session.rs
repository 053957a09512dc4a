//! Session middleware configuration for the dashboard.
//!
//! Sessions are kept in process memory with tower-sessions. Nothing about a
//! session outlives the process, so a restart signs everyone out.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::StockroomConfig;
use crate::models::{AuthView, Notice, session_keys};

/// Session cookie name for the dashboard.
pub const SESSION_COOKIE_NAME: &str = "stockroom_session";

/// Session expiry time in seconds (24 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StockroomConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}

/// Form a signed-out visitor is on.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn auth_view(session: &Session) -> Result<AuthView, tower_sessions::session::Error> {
    Ok(session
        .get::<AuthView>(session_keys::AUTH_VIEW)
        .await?
        .unwrap_or_default())
}

/// Switch the form shown to a signed-out visitor.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_auth_view(
    session: &Session,
    view: AuthView,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::AUTH_VIEW, view).await
}

/// Queue a notice for the next rendered page, replacing any earlier one.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_notice(
    session: &Session,
    notice: &Notice,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::NOTICE, notice).await
}

/// Take the queued notice, leaving none behind.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn take_notice(session: &Session) -> Result<Option<Notice>, tower_sessions::session::Error> {
    session.remove::<Notice>(session_keys::NOTICE).await
}
