//! reqwest-based implementation of [`LinkBackend`].

use async_trait::async_trait;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use reqwest::{Client, redirect::Policy};
use std::time::Duration;
use url::Url;

use crate::domain::account::{AuthReply, AuthRequest};
use crate::domain::backend::{
    LinkBackend, LookupRequest, UpstreamError, UpstreamErrorBody, UpstreamResponse,
};
use crate::domain::short_link::{Passcode, ShortCode};

/// Backend client for `GET {base}/short/{code}[?passcode=n]` and
/// `POST {base}/auth/{login|register}`.
///
/// Redirects are never followed so the resolver sees the backend's own
/// `Location`. The underlying [`Client`] pools connections and is shared by
/// all requests.
#[derive(Debug, Clone)]
pub struct HttpLinkBackend {
    client: Client,
    base_url: Url,
}

impl HttpLinkBackend {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidRequest`] if `base_url` is not an
    /// absolute http(s) URL or the TLS backend cannot be initialised.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| UpstreamError::InvalidRequest(format!("backend URL: {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(UpstreamError::InvalidRequest(format!(
                "backend URL must be http(s), got '{}'",
                base_url.scheme()
            )));
        }

        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::InvalidRequest(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base URL, keeping any path prefix.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();

        {
            let mut path = url.path_segments_mut().map_err(|_| {
                UpstreamError::InvalidRequest("backend URL cannot be a base".to_string())
            })?;
            path.pop_if_empty().extend(segments);
        }

        url.set_query(None);
        Ok(url)
    }

    fn lookup_url(
        &self,
        code: &ShortCode,
        passcode: Option<&Passcode>,
    ) -> Result<Url, UpstreamError> {
        let mut url = self.endpoint(&["short", code.as_str()])?;

        if let Some(passcode) = passcode {
            url.query_pairs_mut().append_pair("passcode", passcode.as_str());
        }

        Ok(url)
    }
}

#[async_trait]
impl LinkBackend for HttpLinkBackend {
    async fn lookup(&self, request: LookupRequest) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.lookup_url(&request.code, request.passcode.as_ref())?;

        let response = self
            .client
            .get(url)
            .headers(request.forwarded)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let message = if status.is_redirection() {
            None
        } else {
            // A body that fails to arrive only loses the message.
            response
                .bytes()
                .await
                .ok()
                .and_then(|body| UpstreamErrorBody::parse(&body))
                .and_then(UpstreamErrorBody::into_message)
        };

        Ok(UpstreamResponse {
            status,
            location,
            message,
        })
    }

    async fn authenticate(&self, request: AuthRequest) -> Result<AuthReply, UpstreamError> {
        let url = self.endpoint(&["auth", request.action.as_str()])?;
        let body = serde_json::to_vec(&request.credentials)
            .map_err(|e| UpstreamError::InvalidRequest(e.to_string()))?;

        let response = self
            .client
            .post(url)
            .headers(request.forwarded)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;

        Ok(AuthReply::from_response(status, &body))
    }

    async fn health_check(&self) -> bool {
        match self.client.get(self.base_url.clone()).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Backend health check failed: {}", e);
                false
            }
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Unreachable(e.to_string())
    }
}
