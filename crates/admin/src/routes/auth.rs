//! Authentication route handlers.
//!
//! Handles the login and registration forms and logout. Successful actions
//! redirect to `/`; rejected ones re-render the form with a notice. Sign-in
//! state, the visible form and notices are all kept in the browser's session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::{
    clear_session, current_user, set_auth_view, set_current_user, set_notice,
};
use crate::models::{AuthView, CurrentUser, Notice};
use crate::services::AuthError;
use crate::state::AppState;

/// Success message after registering.
pub const REGISTERED_MESSAGE: &str = "Registration successful. Please log in.";

/// Success message after logging in.
pub const LOGGED_IN_MESSAGE: &str = "Login successful!";

// =============================================================================
// Form Types
// =============================================================================

/// Login and registration form data.
#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub notice: Option<Notice>,
    pub username: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub notice: Option<Notice>,
    pub username: String,
}

// =============================================================================
// View Toggles
// =============================================================================

/// Switch to the login form.
///
/// # Errors
///
/// Returns `AppError::Session` if the session cannot be updated.
pub async fn login_page(session: Session) -> Result<Redirect, AppError> {
    set_auth_view(&session, AuthView::Login).await?;
    Ok(Redirect::to("/"))
}

/// Switch to the registration form.
///
/// # Errors
///
/// Returns `AppError::Session` if the session cannot be updated.
pub async fn register_page(session: Session) -> Result<Redirect, AppError> {
    set_auth_view(&session, AuthView::Register).await?;
    Ok(Redirect::to("/"))
}

// =============================================================================
// Actions
// =============================================================================

/// Handle login form submission.
///
/// # Errors
///
/// Returns `AppError` only for server-side failures; bad credentials
/// re-render the login form with a 401.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let password = SecretString::from(form.password);
    let result = state.workbench().lock().await.login(&form.username, &password);

    match result {
        Ok(username) => {
            set_current_user(&session, &CurrentUser { username }).await?;
            set_notice(&session, &Notice::success(LOGGED_IN_MESSAGE)).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(e @ AuthError::InvalidCredentials) => {
            tracing::warn!(username = %form.username, "Login failed");
            set_auth_view(&session, AuthView::Login).await?;
            let page = LoginTemplate {
                notice: Some(Notice::error(e.user_message())),
                username: form.username,
            };
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle registration form submission.
///
/// A signed-in visitor is sent back to the dashboard without registering
/// anyone.
///
/// # Errors
///
/// Returns `AppError` only for server-side failures; a taken username or a
/// blank field re-renders the registration form.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    if current_user(&session).await?.is_some() {
        tracing::debug!("Registration ignored: already signed in");
        return Ok(Redirect::to("/").into_response());
    }

    let password = SecretString::from(form.password);
    let result = state
        .workbench()
        .lock()
        .await
        .register(&form.username, &password);

    let err = match result {
        Ok(_) => {
            set_auth_view(&session, AuthView::Login).await?;
            set_notice(&session, &Notice::success(REGISTERED_MESSAGE)).await?;
            return Ok(Redirect::to("/").into_response());
        }
        Err(e) => e,
    };
    let status = match err {
        AuthError::UserAlreadyExists => StatusCode::CONFLICT,
        AuthError::InvalidUsername(_) | AuthError::EmptyPassword => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        _ => return Err(err.into()),
    };

    set_auth_view(&session, AuthView::Register).await?;
    let page = RegisterTemplate {
        notice: Some(Notice::error(err.user_message())),
        username: form.username,
    };
    Ok((status, page).into_response())
}

/// Handle logout.
///
/// # Errors
///
/// Returns `AppError::Session` if the session cannot be cleared.
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Redirect, AppError> {
    if let Some(user) = current_user(&session).await? {
        state.workbench().lock().await.logout(&user.username);
    }
    clear_session(&session).await?;
    Ok(Redirect::to("/"))
}
