//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::{AccountService, ResolverService};
use crate::domain::backend::LinkBackend;
use crate::domain::route_guard::RouteGuard;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ResolverService>,
    pub accounts: Arc<AccountService>,
    pub route_guard: Arc<RouteGuard>,
    /// Name of the session cookie read by the route guard.
    pub session_cookie: Arc<str>,
    /// Client addresses come from the proxy's `X-Forwarded-For`; otherwise
    /// the socket peer is appended to it before forwarding.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn LinkBackend>,
        route_guard: RouteGuard,
        session_cookie: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            resolver: Arc::new(ResolverService::new(backend.clone())),
            accounts: Arc::new(AccountService::new(backend)),
            route_guard: Arc::new(route_guard),
            session_cookie: session_cookie.into(),
            behind_proxy: false,
        }
    }

    pub fn with_behind_proxy(mut self, behind_proxy: bool) -> Self {
        self.behind_proxy = behind_proxy;
        self
    }
}
