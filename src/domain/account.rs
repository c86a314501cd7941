//! Sign-in and registration against the backend auth API.
//!
//! Credentials travel from the login/register forms to the gateway in a POST
//! body and on to the backend as JSON; they never appear in a URL.

use axum::http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::backend::UpstreamErrorBody;

/// Which backend auth endpoint a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

impl AuthAction {
    /// Last path segment of `{base}/auth/{segment}`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }
}

/// Form credentials sent to the backend as JSON.
#[derive(Clone, Serialize)]
pub struct Credentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn register(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks the form locally; returns the message shown on the page.
    pub fn check(&self, action: AuthAction) -> Result<(), &'static str> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err("Enter a valid email address.");
        }
        if self.password.is_empty() {
            return Err("Enter your password.");
        }
        if action == AuthAction::Register
            && self.name.as_deref().is_none_or(|n| n.trim().is_empty())
        {
            return Err("Enter your name.");
        }
        Ok(())
    }
}

/// One call to the backend auth API.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub action: AuthAction,
    pub credentials: Credentials,
    pub forwarded: HeaderMap,
}

/// What the backend said about a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthReply {
    /// Accepted; the session token to store in the cookie.
    Token(String),
    /// Refused, with the backend's message when it sent one.
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },
}

impl AuthReply {
    /// Interprets a backend auth response.
    ///
    /// A 2xx answer must carry a token at `access_token` or `token`, at the
    /// top level or under `data`; without one the attempt counts as rejected.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        if status.is_success() {
            if let Some(token) = TokenBody::parse(body).and_then(TokenBody::into_token) {
                return Self::Token(token);
            }
            return Self::Rejected {
                status: StatusCode::BAD_GATEWAY,
                message: None,
            };
        }

        Self::Rejected {
            status,
            message: UpstreamErrorBody::parse(body).and_then(UpstreamErrorBody::into_message),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct TokenBody {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    data: Option<Box<TokenBody>>,
}

impl TokenBody {
    fn parse(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }

    fn into_token(self) -> Option<String> {
        self.access_token
            .or(self.token)
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.data.and_then(|data| data.into_token()))
    }
}
