//! Data Transfer Objects for requests and responses.
//!
//! All DTOs use Serde for query/form/JSON (de)serialization. Semantic
//! validation of codes and passcodes lives in [`crate::domain::short_link`].

pub mod health;
pub mod redirect;
