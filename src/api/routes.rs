//! Resolver route configuration.

use crate::api::handlers::{passcode_handler, redirect_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public short link routes.
///
/// # Endpoints
///
/// - `GET  /{code}`          - Resolve and redirect (optional `?passcode=`)
/// - `POST /{code}/passcode` - Resolve with a passcode submitted from the entry page
pub fn resolver_routes() -> Router<AppState> {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/{code}/passcode", post(passcode_handler))
}
