//! Resolver layer: the short link redirect and passcode endpoints.
//!
//! # Modules
//!
//! - [`dto`] - Query, form and JSON payloads
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
