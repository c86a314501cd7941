//! Top-level router configuration combining resolver and page routes.
//!
//! # Route Structure
//!
//! - `GET  /{code}`                 - Short link redirect (rate limited)
//! - `POST /{code}/passcode`        - Passcode submission (rate limited)
//! - `GET  /{code}/enter-passcode`  - Passcode form
//! - `GET  /link-error`             - Short link error page
//! - `GET/POST /auth/login`, `/auth/register` - Sign-in pages and submissions
//! - `POST /auth/logout`            - Clear the session cookie
//! - `GET  /main`, `/links`, `/settings` - Dashboard (session cookie required)
//! - `GET  /health`                 - Health check
//! - `/static/*`                    - Static assets
//!
//! # Middleware
//!
//! - **Route guard** - Session cookie check on every navigation
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on resolver routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::route_guard;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the production router.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let resolver = api::routes::resolver_routes().layer(rate_limit::layer(behind_proxy));

    NormalizePathLayer::trim_trailing_slash().layer(compose(state, resolver))
}

/// Constructs the router without rate limiting or path normalization.
///
/// Everything else, including the route guard, is identical to
/// [`app_router`]. Requests do not need `ConnectInfo`.
pub fn router(state: AppState) -> Router {
    compose(state, api::routes::resolver_routes())
}

fn compose(state: AppState, resolver: Router<AppState>) -> Router {
    Router::new()
        .merge(resolver)
        .merge(web::routes::page_routes())
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new("static"))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            route_guard::layer,
        ))
        .with_state(state)
        .layer(tracing::layer())
}
