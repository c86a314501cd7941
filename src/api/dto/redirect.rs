//! DTOs for the short link redirect and passcode endpoints.

use serde::{Deserialize, Serialize};

/// Query string of `GET /{code}`.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectQuery {
    /// Optional 6-digit passcode; blank is treated as absent.
    pub passcode: Option<String>,
}

/// Form body of `POST /{code}/passcode`, submitted by the passcode-entry page.
#[derive(Debug, Deserialize, Serialize)]
pub struct PasscodeForm {
    #[serde(default)]
    pub passcode: String,
}
