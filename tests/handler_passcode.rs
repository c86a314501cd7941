mod common;

use axum::{Router, http::StatusCode, routing::post};
use axum_test::TestServer;
use common::{create_test_state, redirect_to, respond};
use link_gateway::api::handlers::passcode_handler;
use link_gateway::state::AppState;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/{code}/passcode", post(passcode_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_passcode_accepted_redirects_with_see_other() {
    let (state, backend) = create_test_state(redirect_to(
        StatusCode::TEMPORARY_REDIRECT,
        "https://example.com/secret",
    ));
    let server = server(state);

    let response = server
        .post("/locked/passcode")
        .form(&[("passcode", "123456")])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "https://example.com/secret");

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].passcode.as_ref().map(|p| p.as_str()),
        Some("123456")
    );
}

#[tokio::test]
async fn test_passcode_rejected() {
    let (state, _backend) = create_test_state(respond(StatusCode::UNAUTHORIZED));
    let server = server(state);

    let response = server
        .post("/locked/passcode")
        .form(&[("passcode", "000000")])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(
        response.header("location"),
        "/link-error?code=locked&type=invalid_passcode"
    );
}

#[tokio::test]
async fn test_passcode_blank_returns_to_entry_page() {
    let (state, backend) = create_test_state(respond(StatusCode::UNAUTHORIZED));
    let server = server(state);

    let response = server
        .post("/locked/passcode")
        .form(&[("passcode", "")])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/locked/enter-passcode");
    assert!(backend.calls()[0].passcode.is_none());
}

#[tokio::test]
async fn test_passcode_malformed_skips_backend() {
    let (state, backend) = create_test_state(respond(StatusCode::FOUND));
    let server = server(state);

    let response = server
        .post("/locked/passcode")
        .form(&[("passcode", "12ab")])
        .await;

    assert_eq!(
        response.header("location"),
        "/link-error?code=locked&type=invalid_passcode"
    );
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_passcode_requires_form_body() {
    let (state, backend) = create_test_state(respond(StatusCode::FOUND));
    let server = server(state);

    let response = server
        .post("/locked/passcode")
        .json(&serde_json::json!({ "passcode": "123456" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(backend.calls().is_empty());
}
