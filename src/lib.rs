//! # Link Gateway
//!
//! The browser-facing edge of a URL shortener, built with Axum.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Short link references, status mapping, route guard
//! - **Application Layer** ([`application`]) - Resolution service
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP client for the backend link API
//! - **API Layer** ([`api`]) - Redirect and passcode handlers, middleware
//! - **Web Layer** ([`web`]) - Passcode, error, auth and dashboard pages
//!
//! ## Features
//!
//! - Short link resolution through the backend, one lookup per request
//! - Passcode-protected links with an entry form
//! - Error pages per failure kind (`not_found`, `expired`, `network`, ...)
//! - Sign-in and registration through the backend auth API
//! - Cookie-based route guard for dashboard and auth pages
//! - Rate limiting and structured request logging
//!
//! ## Quick Start
//!
//! ```bash
//! export BACKEND_URL="http://localhost:8080/api"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;
pub mod telemetry;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AccountService, ResolverService, SignInOutcome};
    pub use crate::domain::{
        ErrorKind, GuardDecision, LinkBackend, LookupRequest, ResolutionOutcome, RouteGuard,
        UpstreamError, UpstreamResponse,
    };
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
