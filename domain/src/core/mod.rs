//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] / [`model::ModelSequence`]: model identifiers and the ordered dispatch sequence
//! - [`question::Question`]: a persisted analysis question
//! - [`provider::ProviderFamily`]: which catalog and backend a job uses
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod provider;
pub mod question;
pub mod string;
