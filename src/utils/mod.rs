//! Request helpers shared by handlers and middleware.
//!
//! - [`attribution`] - Headers forwarded to the backend for click attribution
//! - [`cookies`] - Session cookie extraction and removal

pub mod attribution;
pub mod cookies;
