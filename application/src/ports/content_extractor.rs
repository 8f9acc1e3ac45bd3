//! Content extraction port

use casequery_domain::DocumentKind;
use thiserror::Error;

/// Errors raised while turning document bytes into text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Unreadable document: {0}")]
    Unreadable(String),
}

/// Converts a raw document into normalized plain text
pub trait ContentExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractionError>;
}
