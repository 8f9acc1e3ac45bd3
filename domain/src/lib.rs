//! Domain layer for casequery
//!
//! This crate contains the core business rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Dispatch
//!
//! A prompt is sent to an ordered [`ModelSequence`] of remote models. Failures
//! are sorted by [`classify_failure`]: quota/rate-limit errors advance to the
//! next model, anything else aborts. When the sequence is exhausted the local
//! model answers instead.
//!
//! ## Documents and folder groups
//!
//! - [`DocumentKind`]: `.htm`/`.html`/`.txt` only
//! - [`derive_output_name`]: answer file naming (`YB12345_1.html` -> `12345.txt`)
//! - [`FolderRunReport`]: per-group outcome of a bulk run, retired all-or-nothing
//!
//! ## Questions
//!
//! Two independent catalogs, one per [`ProviderFamily`], always numbered
//! densely from 1 ([`renumber`]).

pub mod config;
pub mod core;
pub mod dispatch;
pub mod document;
pub mod folder;
pub mod prompt;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{
    error::DomainError,
    model::{Model, ModelSequence},
    provider::ProviderFamily,
    question::{Question, external_id_for, is_densely_numbered, renumber},
    string::{collapse_whitespace, truncate},
};
pub use dispatch::{
    AttemptOutcome, DispatchAttempt, DispatchResult, FailureClass, classify_failure,
    strip_reasoning,
};
pub use document::{DocumentKind, ELIGIBLE_EXTENSIONS, derive_output_name};
pub use folder::{FolderRunReport, GroupOutcome, GroupReport};
pub use prompt::{NO_TASKS_SELECTED, PromptTemplate};
