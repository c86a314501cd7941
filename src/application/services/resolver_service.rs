//! Short link resolution against the backend link API.

use axum::http::HeaderMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::backend::{LinkBackend, LookupRequest};
use crate::domain::outcome::{ErrorKind, ResolutionOutcome};
use crate::domain::short_link::{Passcode, ShortCode};

/// Resolves short codes into browser destinations.
///
/// Each call performs at most one backend lookup and never retries. Invalid
/// input is answered locally: a malformed code is `not_found`, a malformed
/// passcode is `invalid_passcode`.
pub struct ResolverService {
    backend: Arc<dyn LinkBackend>,
}

impl ResolverService {
    pub fn new(backend: Arc<dyn LinkBackend>) -> Self {
        Self { backend }
    }

    /// Backend used for lookups, exposed for health checks.
    pub fn backend(&self) -> &Arc<dyn LinkBackend> {
        &self.backend
    }

    /// Resolves `raw_code` with an optional raw passcode parameter.
    ///
    /// `forwarded` is sent to the backend unchanged; callers pass the
    /// attribution subset of the incoming request headers.
    ///
    /// Never fails: transport errors become [`ErrorKind::Network`].
    pub async fn resolve(
        &self,
        raw_code: &str,
        raw_passcode: Option<&str>,
        forwarded: HeaderMap,
    ) -> ResolutionOutcome {
        let outcome = self.lookup(raw_code, raw_passcode, forwarded).await;
        record(raw_code, &outcome);
        outcome
    }

    /// Resolves a request whose passcode parameter could not be read at all,
    /// e.g. because it was repeated. No backend call is made.
    pub fn reject_passcode(&self, raw_code: &str) -> ResolutionOutcome {
        let outcome = match ShortCode::parse(raw_code) {
            Ok(code) => ResolutionOutcome::error(code.as_str(), ErrorKind::InvalidPasscode),
            Err(_) => ResolutionOutcome::error(raw_code, ErrorKind::NotFound),
        };
        record(raw_code, &outcome);
        outcome
    }

    async fn lookup(
        &self,
        raw_code: &str,
        raw_passcode: Option<&str>,
        forwarded: HeaderMap,
    ) -> ResolutionOutcome {
        let Ok(code) = ShortCode::parse(raw_code) else {
            return ResolutionOutcome::error(raw_code, ErrorKind::NotFound);
        };

        let Ok(passcode) = Passcode::from_param(raw_passcode) else {
            return ResolutionOutcome::error(code.as_str(), ErrorKind::InvalidPasscode);
        };

        let passcode_supplied = passcode.is_some();
        let request = LookupRequest {
            code: code.clone(),
            passcode,
            forwarded,
        };

        match self.backend.lookup(request).await {
            Ok(response) => {
                ResolutionOutcome::from_upstream(code.as_str(), passcode_supplied, &response)
            }
            Err(e) => {
                warn!(code = %code, error = %e, "Link backend request failed");
                ResolutionOutcome::error(code.as_str(), ErrorKind::Network)
            }
        }
    }
}

fn record(raw_code: &str, outcome: &ResolutionOutcome) {
    debug!(code = raw_code, outcome = outcome.tag(), "Resolved short link");
    metrics::counter!("link_resolutions_total", "outcome" => outcome.tag()).increment(1);
}
