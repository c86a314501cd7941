//! Handler for passcode form submissions.

use axum::{
    extract::{Form, Path, State, rejection::FormRejection},
    http::{Extensions, HeaderMap},
    response::Response,
};
use serde_json::json;

use crate::api::dto::redirect::PasscodeForm;
use crate::api::handlers::redirect::{RedirectMode, outcome_response};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::attribution::{attribution_headers, client_peer};

/// Resolves a passcode-protected link with the submitted passcode.
///
/// # Endpoint
///
/// `POST /{code}/passcode` with `application/x-www-form-urlencoded` body
/// `passcode=123456`
///
/// # Responses
///
/// Always `303 See Other` so the browser follows with `GET`:
///
/// - Accepted passcode: to the destination URL
/// - Rejected passcode: to `/link-error?code=..&type=invalid_passcode`
/// - Blank passcode: back to `/{code}/enter-passcode`
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not a urlencoded form.
pub async fn passcode_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
    form: Result<Form<PasscodeForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form.map_err(|rejection| {
        AppError::bad_request(
            "Invalid passcode form",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    let peer = client_peer(&extensions, state.behind_proxy);
    let outcome = state
        .resolver
        .resolve(
            &code,
            Some(&form.passcode),
            attribution_headers(&headers, peer),
        )
        .await;

    outcome_response(&outcome, RedirectMode::FormSubmission)
}
