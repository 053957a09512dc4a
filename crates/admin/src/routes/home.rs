//! Home page and health check.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use stockroom_core::ProductDraft;

use super::auth::{LoginTemplate, RegisterTemplate};
use super::dashboard::DashboardTemplate;
use crate::error::AppError;
use crate::middleware::{auth_view, current_user, take_notice};
use crate::models::AuthView;
use crate::state::AppState;

/// Render whichever view this session is on: login, registration, or the
/// dashboard.
///
/// # Errors
///
/// Returns `AppError::Session` if the session cannot be read.
pub async fn index(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    let notice = take_notice(&session).await?;

    if let Some(user) = current_user(&session).await? {
        let workbench = state.workbench().lock().await;
        let page = DashboardTemplate::build(
            &workbench,
            &user,
            &state.config().currency_symbol,
            notice,
            ProductDraft::default(),
        );
        return Ok(page.into_response());
    }

    let page = match auth_view(&session).await? {
        AuthView::Login => LoginTemplate {
            notice,
            username: String::new(),
        }
        .into_response(),
        AuthView::Register => RegisterTemplate {
            notice,
            username: String::new(),
        }
        .into_response(),
    };
    Ok(page)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
pub async fn health() -> &'static str {
    "ok"
}
