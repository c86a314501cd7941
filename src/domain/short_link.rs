//! Short link references: the code and optional passcode sent to the backend.

use std::fmt;
use thiserror::Error;

/// Maximum accepted short code length.
pub const MAX_CODE_LENGTH: usize = 64;

/// Number of digits in a link passcode.
pub const PASSCODE_LENGTH: usize = 6;

/// Local validation failures for link references.
///
/// Only length and charset are checked here; whether a code exists is
/// decided by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkRefError {
    #[error("short code must be 1-{MAX_CODE_LENGTH} characters of [A-Za-z0-9_-]")]
    InvalidCode,
    #[error("passcode must be exactly {PASSCODE_LENGTH} digits")]
    InvalidPasscode,
}

/// An opaque short code, used purely as a routing key for the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    /// Parses a raw path segment into a short code.
    ///
    /// # Errors
    ///
    /// Returns [`LinkRefError::InvalidCode`] if the code is empty, longer than
    /// [`MAX_CODE_LENGTH`], or contains characters outside `[A-Za-z0-9_-]`.
    pub fn parse(raw: &str) -> Result<Self, LinkRefError> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_CODE_LENGTH
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(LinkRefError::InvalidCode)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A 6-digit link passcode.
///
/// Stored as a string so leading zeros survive the trip to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passcode(String);

impl Passcode {
    /// Parses a passcode, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`LinkRefError::InvalidPasscode`] unless the value is exactly
    /// [`PASSCODE_LENGTH`] ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, LinkRefError> {
        let raw = raw.trim();
        if raw.len() == PASSCODE_LENGTH && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(LinkRefError::InvalidPasscode)
        }
    }

    /// Interprets an optional request parameter.
    ///
    /// A missing or blank parameter means no passcode was supplied.
    pub fn from_param(raw: Option<&str>) -> Result<Option<Self>, LinkRefError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Self::parse(value).map(Some),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
