//! Cookie-based route guard for dashboard and auth pages.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::domain::route_guard::{DASHBOARD_PATH, GuardDecision};
use crate::state::AppState;
use crate::utils::cookies::session_token;

/// Runs the route guard before every page render.
///
/// # Cookie Format
///
/// ```text
/// Cookie: access_token=<token>
/// ```
///
/// Only the presence of a non-empty token is checked; the backend validates
/// it when the page fetches data.
///
/// # Decisions
///
/// 1. Static assets pass untouched
/// 2. Protected path without token: `307` to `/auth/login?redirect={path}`
/// 3. Auth page (login/register) with token: `307` to `/main`
/// 4. Everything else passes through unchanged
///
/// Redirects answer form posts (any method other than `GET`/`HEAD`) with
/// `303` instead, so the browser follows with `GET`.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use crate::web::middleware::route_guard;
///
/// let app = Router::new()
///     .merge(web::routes::page_routes())
///     .layer(middleware::from_fn_with_state(state.clone(), route_guard::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let has_token = session_token(req.headers(), &st.session_cookie).is_some();
    let redirect = redirect_for(req.method());

    match st.route_guard.decide(req.uri().path(), has_token) {
        GuardDecision::Pass => next.run(req).await,
        GuardDecision::RedirectToLogin { target } => {
            tracing::debug!(path = req.uri().path(), "No session, redirecting to login");
            metrics::counter!("route_guard_redirects_total", "target" => "login").increment(1);
            redirect(&target).into_response()
        }
        GuardDecision::RedirectToDashboard => {
            metrics::counter!("route_guard_redirects_total", "target" => "dashboard")
                .increment(1);
            redirect(DASHBOARD_PATH).into_response()
        }
    }
}

fn redirect_for(method: &Method) -> fn(&str) -> Redirect {
    if *method == Method::GET || *method == Method::HEAD {
        Redirect::temporary
    } else {
        Redirect::to
    }
}
