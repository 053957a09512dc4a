//! Authentication extractor for dashboard routes.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tokio::sync::OwnedMutexGuard;
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};
use crate::services::Workbench;
use crate::state::AppState;

/// Extractor that requires a signed-in user.
///
/// Reads the user from the request's session, then takes the workbench lock
/// for the rest of the request. If nobody is signed in, redirects to `/`,
/// which shows the login form.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth { user, .. }: RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth {
    /// The signed-in user.
    pub user: CurrentUser,
    /// Exclusive access to accounts and inventory.
    pub workbench: OwnedMutexGuard<Workbench>,
}

/// Error returned when authentication is required but nobody is signed in.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to the login view.
    RedirectToLogin,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/").into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::RedirectToLogin)?;

        let user = current_user(session)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection::RedirectToLogin)?;

        let workbench = Arc::clone(state.workbench()).lock_owned().await;
        Ok(Self { user, workbench })
    }
}

/// The user signed in on this session, if any.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn current_user(
    session: &Session,
) -> Result<Option<CurrentUser>, tower_sessions::session::Error> {
    session.get(session_keys::CURRENT_USER).await
}

/// Sign `user` in on this session.
///
/// The session id is rotated first so an id issued before login cannot be
/// reused after it.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Sign out and forget everything held in this session.
///
/// # Errors
///
/// Returns an error if the session cannot be cleared.
pub async fn clear_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
