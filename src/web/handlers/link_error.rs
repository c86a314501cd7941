//! Error page shown when a short link cannot be opened.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, rejection::QueryRejection},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::domain::outcome::ErrorKind;
use crate::domain::short_link::ShortCode;

/// Query string produced by the resolver: `?code=..&type=..&message=..`.
#[derive(Debug, Default, Deserialize)]
pub struct LinkErrorQuery {
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
}

/// Template for the link error page.
#[derive(Template, WebTemplate)]
#[template(path = "link_error.html")]
pub struct LinkErrorTemplate {
    pub kind: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub message: Option<String>,
    /// "Try again" link, only offered for well-formed codes.
    pub retry_href: Option<String>,
}

/// Renders the link error page.
///
/// # Endpoint
///
/// `GET /link-error?code=abc&type=expired`
///
/// Unknown or missing `type`, or a query string that cannot be read at all,
/// renders the generic `error` page. The HTTP status follows the error kind
/// (404, 410, 429, ...).
pub async fn link_error_handler(
    query: Result<Query<LinkErrorQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = query.map(|Query(q)| q).unwrap_or_default();

    let kind = query
        .kind
        .as_deref()
        .and_then(ErrorKind::from_tag)
        .unwrap_or(ErrorKind::Error);

    let retry_href = query
        .code
        .as_deref()
        .and_then(|code| ShortCode::parse(code).ok())
        .map(|code| format!("/{code}"));

    let message = query.message.filter(|m| !m.trim().is_empty());

    (
        kind.page_status(),
        LinkErrorTemplate {
            kind: kind.as_str(),
            title: kind.title(),
            description: kind.description(),
            message,
            retry_href,
        },
    )
}
