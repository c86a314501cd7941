//! Resolution outcomes and the status-to-outcome mapping.

use axum::http::StatusCode;
use url::form_urlencoded;

use crate::domain::backend::UpstreamResponse;

/// Path of the link error page.
pub const LINK_ERROR_PATH: &str = "/link-error";

/// Error page tags. Every tag is terminal and never retried by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidPasscode,
    NotFound,
    Forbidden,
    Expired,
    RateLimit,
    Error,
    Network,
}

impl ErrorKind {
    /// Tag used in the `type` query parameter of the error page.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidPasscode => "invalid_passcode",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Expired => "expired",
            Self::RateLimit => "rate_limit",
            Self::Error => "error",
            Self::Network => "network",
        }
    }

    /// Parses a tag; unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "invalid_passcode" => Some(Self::InvalidPasscode),
            "not_found" => Some(Self::NotFound),
            "forbidden" => Some(Self::Forbidden),
            "expired" => Some(Self::Expired),
            "rate_limit" => Some(Self::RateLimit),
            "error" => Some(Self::Error),
            "network" => Some(Self::Network),
            _ => None,
        }
    }

    /// Status used when the error page itself is rendered.
    pub fn page_status(&self) -> StatusCode {
        match self {
            Self::InvalidPasscode => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Expired => StatusCode::GONE,
            Self::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            Self::Error | Self::Network => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::InvalidPasscode => "Incorrect passcode",
            Self::NotFound => "Link not found",
            Self::Forbidden => "Access denied",
            Self::Expired => "Link expired",
            Self::RateLimit => "Too many requests",
            Self::Error => "Something went wrong",
            Self::Network => "Service unavailable",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidPasscode => "The passcode you entered does not match this link.",
            Self::NotFound => "This short link does not exist or has been removed.",
            Self::Forbidden => "You are not allowed to open this link.",
            Self::Expired => "This short link is no longer active.",
            Self::RateLimit => "This link has been opened too often. Please wait a moment.",
            Self::Error => "We could not open this link.",
            Self::Network => "We could not reach the link service. Please try again shortly.",
        }
    }
}

/// What the browser should be sent to after a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Upstream redirect passed through with its original status.
    Destination { location: String, status: StatusCode },
    /// Link is passcode protected and no passcode was supplied.
    PasscodeEntry { code: String },
    /// Terminal error page.
    Error {
        code: String,
        kind: ErrorKind,
        message: Option<String>,
    },
}

impl ResolutionOutcome {
    pub fn error(code: impl Into<String>, kind: ErrorKind) -> Self {
        Self::Error {
            code: code.into(),
            kind,
            message: None,
        }
    }

    /// Maps a backend response to an outcome.
    ///
    /// One status maps to exactly one outcome; `passcode_supplied` only
    /// matters for `401`.
    pub fn from_upstream(code: &str, passcode_supplied: bool, response: &UpstreamResponse) -> Self {
        let status = response.status;

        if is_followable_redirect(status)
            && let Some(location) = response.location.as_deref()
        {
            return Self::Destination {
                location: location.to_string(),
                status,
            };
        }

        let kind = match status {
            StatusCode::UNAUTHORIZED if !passcode_supplied => {
                return Self::PasscodeEntry {
                    code: code.to_string(),
                };
            }
            StatusCode::UNAUTHORIZED => ErrorKind::InvalidPasscode,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            StatusCode::FORBIDDEN => ErrorKind::Forbidden,
            StatusCode::GONE => ErrorKind::Expired,
            StatusCode::TOO_MANY_REQUESTS => ErrorKind::RateLimit,
            _ => ErrorKind::Error,
        };

        let message = match kind {
            ErrorKind::Error => response.message.clone(),
            _ => None,
        };

        Self::Error {
            code: code.to_string(),
            kind,
            message,
        }
    }

    /// Short label for logs and metrics.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Destination { .. } => "destination",
            Self::PasscodeEntry { .. } => "passcode_entry",
            Self::Error { kind, .. } => kind.as_str(),
        }
    }

    /// URL the browser is redirected to.
    pub fn target(&self) -> String {
        match self {
            Self::Destination { location, .. } => location.clone(),
            Self::PasscodeEntry { code } => passcode_entry_target(code),
            Self::Error {
                code,
                kind,
                message,
            } => link_error_target(code, *kind, message.as_deref()),
        }
    }
}

fn is_followable_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// `/{code}/enter-passcode`
pub fn passcode_entry_target(code: &str) -> String {
    format!("/{code}/enter-passcode")
}

/// `/link-error?code=..&type=..[&message=..]`, form-urlencoded.
pub fn link_error_target(code: &str, kind: ErrorKind, message: Option<&str>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("code", code);
    query.append_pair("type", kind.as_str());
    if let Some(message) = message {
        query.append_pair("message", message);
    }
    format!("{LINK_ERROR_PATH}?{}", query.finish())
}
