//! Backend API contract used by the resolver and the sign-in pages.

use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::account::{AuthReply, AuthRequest};
use crate::domain::short_link::{Passcode, ShortCode};

/// A single lookup against the backend link API.
///
/// `forwarded` carries the attribution headers copied from the browser request
/// (see [`crate::utils::attribution`]).
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub code: ShortCode,
    pub passcode: Option<Passcode>,
    pub forwarded: HeaderMap,
}

/// The parts of a backend response the resolver cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub message: Option<String>,
}

impl UpstreamResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            location: None,
            message: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// JSON error body returned by the backend: `{ success, message, error? }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamErrorBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UpstreamErrorBody {
    /// Parses an error body leniently; anything that is not the expected JSON
    /// yields `None`.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }

    /// Human readable message, preferring `message` over `error`.
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.trim().is_empty())
            .or(self.error.filter(|e| !e.trim().is_empty()))
    }
}

/// Transport-level failures talking to the backend.
///
/// Every variant is reported to the browser as the `network` error page.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("backend request timed out")]
    Timeout,
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("could not build backend request: {0}")]
    InvalidRequest(String),
}

/// Backend link-resolution and auth API.
///
/// # Implementations
///
/// - [`crate::infrastructure::backend::HttpLinkBackend`] - reqwest client, redirects disabled
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkBackend: Send + Sync {
    /// Issues exactly one lookup request and reports the raw outcome.
    ///
    /// Upstream redirects must not be followed: a 3xx is returned as-is with
    /// its `Location` header.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] when no HTTP response was received.
    async fn lookup(&self, request: LookupRequest) -> Result<UpstreamResponse, UpstreamError>;

    /// Submits login or registration credentials, once, without retries.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] when no HTTP response was received.
    async fn authenticate(&self, request: AuthRequest) -> Result<AuthReply, UpstreamError>;

    /// Returns `true` if the backend answered any HTTP response.
    async fn health_check(&self) -> bool;
}
