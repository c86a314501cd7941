#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::StatusCode;
use link_gateway::domain::{
    AuthReply, AuthRequest, LinkBackend, LookupRequest, RouteGuard, UpstreamError,
    UpstreamResponse,
};
use link_gateway::state::AppState;
use std::sync::{Arc, Mutex};

/// What the stub backend answers to every lookup.
#[derive(Debug, Clone)]
pub enum StubReply {
    Respond(UpstreamResponse),
    Unreachable,
}

/// In-memory [`LinkBackend`] that records every request it receives.
#[derive(Debug)]
pub struct StubBackend {
    reply: StubReply,
    auth_reply: Option<AuthReply>,
    healthy: bool,
    calls: Mutex<Vec<LookupRequest>>,
    auth_calls: Mutex<Vec<AuthRequest>>,
}

impl StubBackend {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            auth_reply: Some(AuthReply::Token("test-token".to_string())),
            healthy: true,
            calls: Mutex::new(Vec::new()),
            auth_calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers auth requests with `reply`; `None` simulates a transport failure.
    pub fn with_auth(mut self, reply: Option<AuthReply>) -> Self {
        self.auth_reply = reply;
        self
    }

    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::new(StubReply::Unreachable)
        }
    }

    pub fn calls(&self) -> Vec<LookupRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn auth_calls(&self) -> Vec<AuthRequest> {
        self.auth_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkBackend for StubBackend {
    async fn lookup(&self, request: LookupRequest) -> Result<UpstreamResponse, UpstreamError> {
        self.calls.lock().unwrap().push(request);

        match &self.reply {
            StubReply::Respond(response) => Ok(response.clone()),
            StubReply::Unreachable => {
                Err(UpstreamError::Unreachable("connection refused".to_string()))
            }
        }
    }

    async fn authenticate(&self, request: AuthRequest) -> Result<AuthReply, UpstreamError> {
        self.auth_calls.lock().unwrap().push(request);

        self.auth_reply
            .clone()
            .ok_or_else(|| UpstreamError::Unreachable("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}

pub fn respond(status: StatusCode) -> StubReply {
    StubReply::Respond(UpstreamResponse::new(status))
}

pub fn redirect_to(status: StatusCode, location: &str) -> StubReply {
    StubReply::Respond(UpstreamResponse::new(status).with_location(location))
}

pub fn create_test_state_with(backend: StubBackend) -> (AppState, Arc<StubBackend>) {
    let backend = Arc::new(backend);
    let state = AppState::new(backend.clone(), RouteGuard::default(), "access_token");
    (state, backend)
}

pub fn create_test_state(reply: StubReply) -> (AppState, Arc<StubBackend>) {
    create_test_state_with(StubBackend::new(reply))
}
