//! Core types of the gateway.
//!
//! Nothing here performs I/O: the backend is reached through the
//! [`backend::LinkBackend`] trait, and both the status mapping and the route
//! guard are pure functions.
//!
//! # Modules
//!
//! - [`short_link`] - Short code and passcode validation
//! - [`account`] - Sign-in credentials and backend auth replies
//! - [`backend`] - Backend lookup contract and transport errors
//! - [`outcome`] - Status-to-outcome mapping and internal navigation targets
//! - [`route_guard`] - Protected/auth path decisions

pub mod account;
pub mod backend;
pub mod outcome;
pub mod route_guard;
pub mod short_link;

pub use account::{AuthAction, AuthReply, AuthRequest, Credentials};
pub use backend::{LinkBackend, LookupRequest, UpstreamError, UpstreamResponse};
pub use outcome::{ErrorKind, ResolutionOutcome};
pub use route_guard::{GuardDecision, RouteGuard};
pub use short_link::{LinkRefError, Passcode, ShortCode};

#[cfg(test)]
pub use backend::MockLinkBackend;
