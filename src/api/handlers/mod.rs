//! HTTP request handlers for resolver endpoints.

pub mod health;
pub mod passcode;
pub mod redirect;

pub use health::health_handler;
pub use passcode::passcode_handler;
pub use redirect::redirect_handler;
