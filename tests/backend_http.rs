use axum::{
    Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use link_gateway::domain::{
    AuthAction, AuthReply, AuthRequest, Credentials, LinkBackend, LookupRequest, Passcode,
    ShortCode, UpstreamError,
};
use link_gateway::infrastructure::backend::HttpLinkBackend;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Deserialize)]
struct LookupQuery {
    passcode: Option<String>,
}

/// Minimal stand-in for the link API.
async fn short_handler(
    Path(code): Path<String>,
    Query(query): Query<LookupQuery>,
    headers: HeaderMap,
) -> Response {
    match code.as_str() {
        "moved" => (
            StatusCode::FOUND,
            [(header::LOCATION, "https://example.com/landing")],
        )
            .into_response(),
        "locked" => match query.passcode.as_deref() {
            Some("123456") => (
                StatusCode::TEMPORARY_REDIRECT,
                [(header::LOCATION, "https://example.com/secret")],
            )
                .into_response(),
            _ => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "message": "Passcode required" })),
            )
                .into_response(),
        },
        "broken" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": "Database offline" })),
        )
            .into_response(),
        "echo" => {
            let agent = headers
                .get(header::USER_AGENT)
                .cloned()
                .unwrap_or(HeaderValue::from_static(""));
            (
                StatusCode::FOUND,
                [(header::LOCATION, agent)],
            )
                .into_response()
        }
        _ => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login_handler(Json(body): Json<LoginBody>) -> Response {
    if body.email == "ann@example.com" && body.password == "secret" {
        Json(json!({ "success": true, "data": { "access_token": "jwt-token" } })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid email or password" })),
        )
            .into_response()
    }
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/short/{code}", get(short_handler))
        .route("/auth/login", post(login_handler));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn request(code: &str, passcode: Option<&str>) -> LookupRequest {
    LookupRequest {
        code: ShortCode::parse(code).unwrap(),
        passcode: passcode.map(|p| Passcode::parse(p).unwrap()),
        forwarded: HeaderMap::new(),
    }
}

fn client(base_url: &str) -> HttpLinkBackend {
    HttpLinkBackend::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_lookup_does_not_follow_redirects() {
    let backend = client(&spawn_backend().await);

    let response = backend.lookup(request("moved", None)).await.unwrap();

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(
        response.location.as_deref(),
        Some("https://example.com/landing")
    );
    assert!(response.message.is_none());
}

#[tokio::test]
async fn test_lookup_sends_passcode_query() {
    let backend = client(&spawn_backend().await);

    let locked = backend.lookup(request("locked", None)).await.unwrap();
    assert_eq!(locked.status, StatusCode::UNAUTHORIZED);
    assert_eq!(locked.message.as_deref(), Some("Passcode required"));

    let unlocked = backend
        .lookup(request("locked", Some("123456")))
        .await
        .unwrap();
    assert_eq!(unlocked.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        unlocked.location.as_deref(),
        Some("https://example.com/secret")
    );
}

#[tokio::test]
async fn test_lookup_reads_error_field_from_body() {
    let backend = client(&spawn_backend().await);

    let response = backend.lookup(request("broken", None)).await.unwrap();

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.message.as_deref(), Some("Database offline"));
}

#[tokio::test]
async fn test_lookup_ignores_non_json_body() {
    let backend = client(&spawn_backend().await);

    let response = backend.lookup(request("missing", None)).await.unwrap();

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.message.is_none());
}

#[tokio::test]
async fn test_lookup_forwards_headers() {
    let backend = client(&spawn_backend().await);

    let mut lookup = request("echo", None);
    lookup
        .forwarded
        .insert(header::USER_AGENT, HeaderValue::from_static("TestBrowser/1.0"));

    let response = backend.lookup(lookup).await.unwrap();

    assert_eq!(response.location.as_deref(), Some("TestBrowser/1.0"));
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let base = spawn_backend().await;
    let backend = client(&format!("{base}/api/"));

    // The stand-in only serves /short/*, so a kept prefix yields a 404.
    let response = backend.lookup(request("moved", None)).await.unwrap();

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_check_reachable() {
    let backend = client(&spawn_backend().await);

    assert!(backend.health_check().await);
}

#[tokio::test]
async fn test_unreachable_backend() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = client(&format!("http://{addr}"));

    let result = backend.lookup(request("moved", None)).await;

    assert!(matches!(
        result,
        Err(UpstreamError::Unreachable(_)) | Err(UpstreamError::Timeout)
    ));
    assert!(!backend.health_check().await);
}

fn login(email: &str, password: &str) -> AuthRequest {
    AuthRequest {
        action: AuthAction::Login,
        credentials: Credentials::login(email, password),
        forwarded: HeaderMap::new(),
    }
}

#[tokio::test]
async fn test_authenticate_posts_json_credentials() {
    let backend = client(&spawn_backend().await);

    let reply = backend
        .authenticate(login("ann@example.com", "secret"))
        .await
        .unwrap();

    assert_eq!(reply, AuthReply::Token("jwt-token".to_string()));
}

#[tokio::test]
async fn test_authenticate_rejected() {
    let backend = client(&spawn_backend().await);

    let reply = backend
        .authenticate(login("ann@example.com", "wrong"))
        .await
        .unwrap();

    assert_eq!(
        reply,
        AuthReply::Rejected {
            status: StatusCode::UNAUTHORIZED,
            message: Some("Invalid email or password".to_string()),
        }
    );
}
