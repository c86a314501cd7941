//! Application layer services.
//!
//! Services orchestrate domain operations behind a small API for HTTP
//! handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::resolver_service::ResolverService`] - Short link resolution via the backend
//! - [`services::account_service::AccountService`] - Sign-in and registration via the backend

pub mod services;
