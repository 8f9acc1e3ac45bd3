//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rejected before extraction is attempted
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Unknown provider family: {0}")]
    UnknownProviderFamily(String),
}
