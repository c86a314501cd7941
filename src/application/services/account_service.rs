//! Sign-in and registration through the backend auth API.

use axum::http::HeaderMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::account::{AuthAction, AuthReply, AuthRequest, Credentials};
use crate::domain::backend::LinkBackend;

/// Result of a sign-in attempt, as shown to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Store this token in the session cookie.
    Session(String),
    /// Show the form again with this message.
    Rejected(String),
    /// The backend could not be reached.
    Unavailable,
}

impl SignInOutcome {
    fn tag(&self) -> &'static str {
        match self {
            Self::Session(_) => "session",
            Self::Rejected(_) => "rejected",
            Self::Unavailable => "unavailable",
        }
    }
}

const DEFAULT_REJECTION: &str = "Invalid email or password.";

pub struct AccountService {
    backend: Arc<dyn LinkBackend>,
}

impl AccountService {
    pub fn new(backend: Arc<dyn LinkBackend>) -> Self {
        Self { backend }
    }

    /// Checks the credentials locally, then makes at most one backend call.
    pub async fn sign_in(
        &self,
        action: AuthAction,
        credentials: Credentials,
        forwarded: HeaderMap,
    ) -> SignInOutcome {
        let outcome = self.submit(action, credentials, forwarded).await;

        debug!(action = action.as_str(), outcome = outcome.tag(), "Sign-in attempt");
        metrics::counter!(
            "auth_attempts_total",
            "action" => action.as_str(),
            "outcome" => outcome.tag()
        )
        .increment(1);

        outcome
    }

    async fn submit(
        &self,
        action: AuthAction,
        credentials: Credentials,
        forwarded: HeaderMap,
    ) -> SignInOutcome {
        if let Err(message) = credentials.check(action) {
            return SignInOutcome::Rejected(message.to_string());
        }

        let request = AuthRequest {
            action,
            credentials,
            forwarded,
        };

        match self.backend.authenticate(request).await {
            Ok(AuthReply::Token(token)) => SignInOutcome::Session(token),
            Ok(AuthReply::Rejected { message, .. }) => {
                SignInOutcome::Rejected(message.unwrap_or_else(|| DEFAULT_REJECTION.to_string()))
            }
            Err(e) => {
                warn!(action = action.as_str(), error = %e, "Auth backend request failed");
                SignInOutcome::Unavailable
            }
        }
    }
}
