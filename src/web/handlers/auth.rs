//! Login, registration and logout pages.
//!
//! The forms post to the gateway, which forwards the credentials to the
//! backend auth API and stores the returned token in the session cookie.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, Query, State, rejection::FormRejection, rejection::QueryRejection},
    http::{Extensions, HeaderMap, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::application::services::SignInOutcome;
use crate::domain::account::{AuthAction, Credentials};
use crate::domain::route_guard::{DASHBOARD_PATH, LOGIN_PATH, sanitize_return_target};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::attribution::{attribution_headers, client_peer};
use crate::utils::cookies::{removal_cookie, session_cookie};

const UNAVAILABLE: &str = "The sign-in service is unavailable. Please try again shortly.";

/// Query string of the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// Page to return to after signing in, set by the route guard.
    pub redirect: Option<String>,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub redirect: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub redirect: String,
    pub email: String,
    pub error: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub name: String,
    pub email: String,
    pub error: Option<String>,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /auth/login?redirect=/links`
///
/// Off-site or unreadable `redirect` values are replaced by `/main`.
pub async fn login_handler(
    query: Result<Query<LoginQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = query.map(|Query(q)| q).unwrap_or_default();

    LoginTemplate {
        redirect: sanitize_return_target(query.redirect.as_deref()),
        email: String::new(),
        error: None,
    }
}

/// Signs in with the backend.
///
/// # Endpoint
///
/// `POST /auth/login` with `email`, `password` and `redirect` form fields
///
/// # Responses
///
/// - **303 See Other**: to `redirect` (or `/main`), with the session cookie set
/// - **401 Unauthorized**: form shown again with the backend's message
/// - **502 Bad Gateway**: form shown again, backend unreachable
pub async fn login_submit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form.map_err(form_error)?;
    let redirect = sanitize_return_target(Some(form.redirect.as_str()));

    let outcome = state
        .accounts
        .sign_in(
            AuthAction::Login,
            Credentials::login(form.email.trim(), form.password),
            attribution_headers(&headers, client_peer(&extensions, state.behind_proxy)),
        )
        .await;

    let page = |status: StatusCode, error: &str| {
        (
            status,
            LoginTemplate {
                redirect: redirect.clone(),
                email: form.email.clone(),
                error: Some(error.to_string()),
            },
        )
            .into_response()
    };

    Ok(match &outcome {
        SignInOutcome::Session(token) => signed_in(&state, token, &redirect),
        SignInOutcome::Rejected(message) => page(StatusCode::UNAUTHORIZED, message),
        SignInOutcome::Unavailable => page(StatusCode::BAD_GATEWAY, UNAVAILABLE),
    })
}

/// Renders the registration page.
///
/// # Endpoint
///
/// `GET /auth/register`
pub async fn register_handler() -> impl IntoResponse {
    RegisterTemplate {
        name: String::new(),
        email: String::new(),
        error: None,
    }
}

/// Creates an account with the backend and signs in.
///
/// # Endpoint
///
/// `POST /auth/register` with `name`, `email` and `password` form fields
///
/// Responds like [`login_submit_handler`]; success lands on `/main`.
pub async fn register_submit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form.map_err(form_error)?;

    let outcome = state
        .accounts
        .sign_in(
            AuthAction::Register,
            Credentials::register(form.name.trim(), form.email.trim(), form.password),
            attribution_headers(&headers, client_peer(&extensions, state.behind_proxy)),
        )
        .await;

    let page = |status: StatusCode, error: &str| {
        (
            status,
            RegisterTemplate {
                name: form.name.clone(),
                email: form.email.clone(),
                error: Some(error.to_string()),
            },
        )
            .into_response()
    };

    Ok(match &outcome {
        SignInOutcome::Session(token) => signed_in(&state, token, DASHBOARD_PATH),
        SignInOutcome::Rejected(message) => page(StatusCode::UNPROCESSABLE_ENTITY, message),
        SignInOutcome::Unavailable => page(StatusCode::BAD_GATEWAY, UNAVAILABLE),
    })
}

/// Clears the session cookie and returns to the login page.
///
/// # Endpoint
///
/// `POST /auth/logout`
pub async fn logout_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, removal_cookie(&state.session_cookie))],
        Redirect::to(LOGIN_PATH),
    )
}

fn signed_in(state: &AppState, token: &str, target: &str) -> Response {
    (
        [(SET_COOKIE, session_cookie(&state.session_cookie, token))],
        Redirect::to(target),
    )
        .into_response()
}

fn form_error(rejection: FormRejection) -> AppError {
    AppError::bad_request(
        "Invalid form submission",
        json!({ "reason": rejection.body_text() }),
    )
}
