//! Application layer for casequery
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DispatchParams;
pub use ports::{
    connectivity::ConnectivityProbe,
    content_extractor::{ContentExtractor, ExtractionError},
    file_store::{FileStore, FileStoreError},
    llm_gateway::{ChatMessage, ChatRole, GatewayError, LocalModelRuntime, RemoteModelGateway},
    progress::{FolderProgressNotifier, NoProgress},
    question_repository::{QuestionRepository, RepositoryError, SettingsRepository},
};
pub use use_cases::dispatch_prompt::{DispatchError, DispatchInput, DispatchOutput, ModelDispatcher};
pub use use_cases::process_document::{
    DocumentJob, ProcessDocumentError, ProcessDocumentUseCase, ProcessedDocument, Relocation,
};
pub use use_cases::process_folder::{FolderJob, ProcessFolderError, ProcessFolderUseCase};
pub use use_cases::question_catalog::QuestionCatalog;
