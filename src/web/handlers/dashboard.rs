//! Dashboard page handlers.
//!
//! The pages are shells: charts, tables and forms load their data from the
//! backend API in the browser.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Redirect};

use crate::domain::route_guard::DASHBOARD_PATH;

/// Template for the dashboard home page.
///
/// Renders `templates/dashboard.html` with placeholders for:
/// - Usage cards (links, clicks, active links)
/// - Click chart
/// - Recent activity
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {}

/// Template for the links management page.
#[derive(Template, WebTemplate)]
#[template(path = "links.html")]
pub struct LinksTemplate {}

/// Template for the account settings page.
#[derive(Template, WebTemplate)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {}

/// `GET /` sends visitors to the dashboard; the route guard bounces
/// anonymous ones on to the login page.
pub async fn index_handler() -> Redirect {
    Redirect::temporary(DASHBOARD_PATH)
}

/// Renders the dashboard home page.
///
/// # Endpoint
///
/// `GET /main`
pub async fn dashboard_handler() -> impl IntoResponse {
    DashboardTemplate {}
}

/// Renders the link management page.
///
/// # Endpoint
///
/// `GET /links`
pub async fn links_handler() -> impl IntoResponse {
    LinksTemplate {}
}

/// Renders the settings page.
///
/// # Endpoint
///
/// `GET /settings`
pub async fn settings_handler() -> impl IntoResponse {
    SettingsTemplate {}
}
