//! Question store and settings store ports

use casequery_domain::{ModelSequence, ProviderFamily, Question};
use thiserror::Error;

/// Persistence failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Question {id} not found in the {family} catalog")]
    NotFound { family: ProviderFamily, id: u32 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// One provider family's question catalog.
///
/// Every mutating call renumbers the catalog to dense ids `1..=n`
/// (external ids `Q_<id>`) within the same store transaction.
pub trait QuestionRepository: Send + Sync {
    fn family(&self) -> ProviderFamily;

    /// All questions ordered by id
    fn list(&self) -> Result<Vec<Question>, RepositoryError>;

    /// Append a question; returns it with its assigned id
    fn add(&self, text: &str) -> Result<Question, RepositoryError>;

    fn update(&self, id: u32, text: &str) -> Result<Question, RepositoryError>;

    fn delete(&self, id: u32) -> Result<(), RepositoryError>;

    /// Resequence ids to `1..=n` preserving order
    fn renumber(&self) -> Result<(), RepositoryError>;
}

/// Application-wide settings record (the persisted model sequence)
pub trait SettingsRepository: Send + Sync {
    /// Stored sequence, or `None` if never saved
    fn load_model_sequence(&self) -> Result<Option<ModelSequence>, RepositoryError>;

    fn save_model_sequence(&self, sequence: &ModelSequence) -> Result<(), RepositoryError>;
}
