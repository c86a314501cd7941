//! Page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    dashboard_handler, enter_passcode_handler, index_handler, link_error_handler, links_handler,
    login_handler, login_submit_handler, logout_handler, register_handler,
    register_submit_handler, settings_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Server-rendered pages.
///
/// Access control is applied by [`crate::web::middleware::route_guard`] over
/// the whole router, not per route.
///
/// # Endpoints
///
/// - `GET /`                       - Redirect to the dashboard
/// - `GET /main`                   - Dashboard home (protected)
/// - `GET /links`                  - Link management (protected)
/// - `GET /settings`               - Account settings (protected)
/// - `GET/POST /auth/login`        - Login page and form submission (auth-only)
/// - `GET/POST /auth/register`     - Registration page and form submission (auth-only)
/// - `POST /auth/logout`           - Clear session cookie
/// - `GET /link-error`             - Short link error page
/// - `GET /{code}/enter-passcode`  - Passcode form for a protected link
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/main", get(dashboard_handler))
        .route("/links", get(links_handler))
        .route("/settings", get(settings_handler))
        .route("/auth/login", get(login_handler).post(login_submit_handler))
        .route(
            "/auth/register",
            get(register_handler).post(register_submit_handler),
        )
        .route("/auth/logout", post(logout_handler))
        .route("/link-error", get(link_error_handler))
        .route("/{code}/enter-passcode", get(enter_passcode_handler))
}
