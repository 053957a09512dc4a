//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Login view, registration view, or dashboard
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /auth/login             - Switch to the login view
//! POST /auth/login             - Login action
//! GET  /auth/register          - Switch to the registration view
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Inventory (requires auth)
//! POST /products               - Add a product
//! POST /products/{id}/remove   - Ask to remove a product (opens the prompt)
//! POST /removal/confirm        - Remove the product awaiting confirmation
//! POST /removal/cancel         - Close the prompt
//! ```
//!
//! Each browser has its own session cookie. Signing in on one browser does
//! not sign in any other.

pub mod auth;
pub mod dashboard;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(products::add))
        .route("/{id}/remove", post(products::request_remove))
}

/// Create the removal prompt routes router.
pub fn removal_routes() -> Router<AppState> {
    Router::new()
        .route("/confirm", post(products::confirm_remove))
        .route("/cancel", post(products::cancel_remove))
}

/// Create all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(home::health))
        .nest("/auth", auth_routes())
        .nest("/products", product_routes())
        .nest("/removal", removal_routes())
}

/// Build the complete application with sessions, request tracing, and state
/// attached.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    routes()
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
