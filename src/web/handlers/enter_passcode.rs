//! Passcode entry page for protected short links.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::Path,
    response::{IntoResponse, Redirect, Response},
};

use crate::domain::outcome::{ErrorKind, link_error_target};
use crate::domain::short_link::{PASSCODE_LENGTH, ShortCode};

#[derive(Template, WebTemplate)]
#[template(path = "enter_passcode.html")]
pub struct EnterPasscodeTemplate {
    pub code: String,
    pub action: String,
    pub passcode_length: usize,
}

/// Renders the passcode form for a short link.
///
/// # Endpoint
///
/// `GET /{code}/enter-passcode`
///
/// The form posts to `/{code}/passcode`. Malformed codes are sent straight to
/// the `not_found` error page.
pub async fn enter_passcode_handler(Path(code): Path<String>) -> Response {
    match ShortCode::parse(&code) {
        Ok(code) => EnterPasscodeTemplate {
            action: format!("/{code}/passcode"),
            code: code.to_string(),
            passcode_length: PASSCODE_LENGTH,
        }
        .into_response(),
        Err(_) => {
            Redirect::temporary(&link_error_target(&code, ErrorKind::NotFound, None))
                .into_response()
        }
    }
}
