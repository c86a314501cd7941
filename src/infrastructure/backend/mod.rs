//! Backend link API clients.

mod http_backend;

pub use http_backend::HttpLinkBackend;
