//! Handler for short URL redirect.

use axum::{
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{Extensions, HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::redirect::RedirectQuery;
use crate::domain::outcome::ResolutionOutcome;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::attribution::{attribution_headers, client_peer};

/// `Cache-Control` sent with every resolver response.
pub const NO_CACHE: &str = "no-store, no-cache, must-revalidate";

/// How the browser reached the resolver, which decides redirect statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// Plain navigation (`GET`): upstream status is kept, internal pages use 307.
    Navigation,
    /// Passcode form (`POST`): everything uses 303 so the browser switches to `GET`.
    FormSubmission,
}

impl RedirectMode {
    fn internal_status(self) -> StatusCode {
        match self {
            Self::Navigation => StatusCode::TEMPORARY_REDIRECT,
            Self::FormSubmission => StatusCode::SEE_OTHER,
        }
    }

    fn destination_status(self, upstream: StatusCode) -> StatusCode {
        match self {
            Self::Navigation => upstream,
            Self::FormSubmission => StatusCode::SEE_OTHER,
        }
    }
}

/// Redirects a short code through the backend link API.
///
/// # Endpoint
///
/// `GET /{code}` or `GET /{code}?passcode=123456`
///
/// # Request Flow
///
/// 1. Copy attribution headers (User-Agent, X-Forwarded-For, Referer, client hints)
/// 2. One backend lookup, redirects not followed
/// 3. Map the backend status to a destination, passcode page or error page
///
/// # Responses
///
/// - Backend 301/302/303/307/308 with `Location`: same status, same location
/// - Backend 401 without passcode: 307 to `/{code}/enter-passcode`
/// - Anything else: 307 to `/link-error?code=..&type=..`
/// - Unreadable query string (e.g. `passcode` given twice): `invalid_passcode`,
///   without a backend call
///
/// All responses carry `Cache-Control: no-store`.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
    query: Result<Query<RedirectQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let outcome = match query {
        Ok(Query(query)) => {
            let peer = client_peer(&extensions, state.behind_proxy);
            state
                .resolver
                .resolve(
                    &code,
                    query.passcode.as_deref(),
                    attribution_headers(&headers, peer),
                )
                .await
        }
        Err(rejection) => {
            tracing::debug!(code = %code, reason = %rejection.body_text(), "Unreadable redirect query");
            state.resolver.reject_passcode(&code)
        }
    };

    outcome_response(&outcome, RedirectMode::Navigation)
}

/// Renders a resolution outcome as an uncacheable redirect.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the destination cannot be used as a
/// `Location` header value.
pub fn outcome_response(
    outcome: &ResolutionOutcome,
    mode: RedirectMode,
) -> Result<Response, AppError> {
    let status = match outcome {
        ResolutionOutcome::Destination { status, .. } => mode.destination_status(*status),
        _ => mode.internal_status(),
    };

    let target = outcome.target();
    let location = HeaderValue::try_from(target.as_str()).map_err(|_| {
        AppError::internal("Invalid redirect location", json!({ "location": target }))
    })?;

    Ok((
        status,
        [
            (header::LOCATION, location),
            (header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE)),
        ],
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outcome::ErrorKind;

    #[test]
    fn test_destination_keeps_status_on_navigation() {
        let outcome = ResolutionOutcome::Destination {
            location: "https://example.com".to_string(),
            status: StatusCode::MOVED_PERMANENTLY,
        };

        let response = outcome_response(&outcome, RedirectMode::Navigation).unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "https://example.com");
        assert_eq!(response.headers()[header::CACHE_CONTROL], NO_CACHE);
    }

    #[test]
    fn test_form_submission_always_uses_see_other() {
        let outcome = ResolutionOutcome::Destination {
            location: "https://example.com".to_string(),
            status: StatusCode::TEMPORARY_REDIRECT,
        };
        let response = outcome_response(&outcome, RedirectMode::FormSubmission).unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let outcome = ResolutionOutcome::error("abc", ErrorKind::InvalidPasscode);
        let response = outcome_response(&outcome, RedirectMode::FormSubmission).unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/link-error?code=abc&type=invalid_passcode"
        );
    }

    #[test]
    fn test_internal_targets_use_temporary_redirect() {
        let outcome = ResolutionOutcome::PasscodeEntry {
            code: "abc".to_string(),
        };

        let response = outcome_response(&outcome, RedirectMode::Navigation).unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/abc/enter-passcode");
    }

    #[test]
    fn test_unusable_location_is_internal_error() {
        let outcome = ResolutionOutcome::Destination {
            location: "https://example.com/\nX-Injected: 1".to_string(),
            status: StatusCode::FOUND,
        };

        let result = outcome_response(&outcome, RedirectMode::Navigation);

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
