//! HTML template rendering handlers.

mod auth;
mod dashboard;
mod enter_passcode;
mod link_error;

pub use auth::{
    login_handler, login_submit_handler, logout_handler, register_handler,
    register_submit_handler,
};
pub use dashboard::{dashboard_handler, index_handler, links_handler, settings_handler};
pub use enter_passcode::enter_passcode_handler;
pub use link_error::link_error_handler;
