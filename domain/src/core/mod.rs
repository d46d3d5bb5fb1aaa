//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelId`] — identifier of a candidate remote model
//! - [`credential::ApiKey`] — provider credential, redacted in debug output
//! - [`error::DomainError`] — domain-level errors

pub mod credential;
pub mod error;
pub mod model;
