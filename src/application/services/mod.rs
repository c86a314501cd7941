//! Business logic services for the application layer.

pub mod account_service;
pub mod resolver_service;

pub use account_service::{AccountService, SignInOutcome};
pub use resolver_service::ResolverService;
