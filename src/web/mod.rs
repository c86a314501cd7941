//! Web layer for browser-facing pages.
//!
//! Provides the passcode and error pages used by the resolver, the auth pages
//! and the dashboard shells. Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Route guard (session cookie check)
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
