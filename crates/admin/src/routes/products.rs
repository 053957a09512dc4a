//! Product route handlers.
//!
//! All handlers require a signed-in user. Rejected actions re-render the
//! dashboard with a notice and an appropriate status.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use stockroom_core::{ProductDraft, ProductId};

use super::dashboard::DashboardTemplate;
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::Notice;
use crate::services::InventoryError;
use crate::state::AppState;

/// Re-render the dashboard for a rejected action, or bubble server errors.
fn rejected(
    state: &AppState,
    auth: &RequireAuth,
    err: InventoryError,
    draft: ProductDraft,
) -> Result<Response, AppError> {
    let status = match err {
        InventoryError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        InventoryError::RemovalPending | InventoryError::NoPendingRemoval => StatusCode::CONFLICT,
        InventoryError::IndexOutOfRange { .. } | InventoryError::ProductNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        InventoryError::Repository(_) => return Err(err.into()),
    };

    let page = DashboardTemplate::build(
        &auth.workbench,
        &auth.user,
        &state.config().currency_symbol,
        Some(Notice::error(err.user_message())),
        draft,
    );
    Ok((status, page).into_response())
}

/// Handle the add-product form.
///
/// On validation failure the form is re-rendered with the submitted values.
///
/// # Errors
///
/// Returns `AppError` if the inventory cannot be saved.
pub async fn add(
    State(state): State<AppState>,
    mut auth: RequireAuth,
    Form(draft): Form<ProductDraft>,
) -> Result<Response, AppError> {
    match auth.workbench.add_product(&draft) {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(e) => rejected(&state, &auth, e, draft),
    }
}

/// Open the removal prompt for a product.
///
/// # Errors
///
/// Returns `AppError` only for server-side failures.
pub async fn request_remove(
    State(state): State<AppState>,
    mut auth: RequireAuth,
    Path(id): Path<ProductId>,
) -> Result<Response, AppError> {
    match auth.workbench.request_remove(id) {
        Ok(()) => Ok(Redirect::to("/").into_response()),
        Err(e) => rejected(&state, &auth, e, ProductDraft::default()),
    }
}

/// Remove the product awaiting confirmation.
///
/// # Errors
///
/// Returns `AppError` if the inventory cannot be saved.
pub async fn confirm_remove(
    State(state): State<AppState>,
    mut auth: RequireAuth,
) -> Result<Response, AppError> {
    match auth.workbench.confirm_remove() {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(e) => rejected(&state, &auth, e, ProductDraft::default()),
    }
}

/// Close the removal prompt without removing anything.
pub async fn cancel_remove(mut auth: RequireAuth) -> Redirect {
    auth.workbench.cancel_remove();
    Redirect::to("/")
}
