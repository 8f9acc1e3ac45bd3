//! Process Document use case
//!
//! Extract -> assemble prompt -> dispatch -> write answer -> relocate source.
//! Nothing is written unless the dispatch succeeded.

use crate::config::DispatchParams;
use crate::ports::content_extractor::{ContentExtractor, ExtractionError};
use crate::ports::file_store::{FileStore, FileStoreError};
use crate::ports::question_repository::{RepositoryError, SettingsRepository};
use crate::use_cases::dispatch_prompt::{
    DispatchError, DispatchInput, DispatchOutput, ModelDispatcher,
};
use casequery_domain::{
    DocumentKind, DomainError, ModelSequence, PromptTemplate, ProviderFamily, derive_output_name,
};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while processing one document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessDocumentError {
    #[error("No network connection; document not processed")]
    Offline,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Dispatch failed: {0}")]
    Dispatch(DispatchError),

    #[error("Settings unavailable: {0}")]
    Persistence(#[from] RepositoryError),

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FileStoreError),

    /// The answer was written but the source could not be relocated
    #[error("Answer written to {} but relocating the source failed: {source}", output_path.display())]
    Relocation {
        output_path: PathBuf,
        source: FileStoreError,
    },
}

impl From<DispatchError> for ProcessDocumentError {
    fn from(e: DispatchError) -> Self {
        match e {
            DispatchError::Offline => ProcessDocumentError::Offline,
            other => ProcessDocumentError::Dispatch(other),
        }
    }
}

impl From<DomainError> for ProcessDocumentError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UnsupportedFileType(name) => ProcessDocumentError::UnsupportedFileType(name),
            other => ProcessDocumentError::Extraction(ExtractionError::Unreadable(other.to_string())),
        }
    }
}

/// What happens to the source file after a successful answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relocation {
    /// Standalone upload: the source is removed from its original place
    Move,
    /// Inside a folder group: the source stays until the whole group succeeds
    Copy,
}

/// One document to process (the implicit processing job)
#[derive(Debug, Clone)]
pub struct DocumentJob {
    pub source: PathBuf,
    /// Selected question texts, in prompt order
    pub questions: Vec<String>,
    pub family: ProviderFamily,
    /// Directory receiving the answer file
    pub output_dir: PathBuf,
    /// Directory receiving the relocated source
    pub completed_dir: PathBuf,
    pub relocation: Relocation,
}

impl DocumentJob {
    pub fn new(
        source: impl Into<PathBuf>,
        questions: Vec<String>,
        output_dir: impl Into<PathBuf>,
        completed_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            questions,
            family: ProviderFamily::default(),
            output_dir: output_dir.into(),
            completed_dir: completed_dir.into(),
            relocation: Relocation::Move,
        }
    }

    pub fn with_family(mut self, family: ProviderFamily) -> Self {
        self.family = family;
        self
    }

    pub fn with_relocation(mut self, relocation: Relocation) -> Self {
        self.relocation = relocation;
        self
    }

    fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

/// A successfully processed document
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub source: PathBuf,
    pub output_path: PathBuf,
    pub relocated_to: PathBuf,
    pub dispatch: DispatchOutput,
}

impl ProcessedDocument {
    pub fn answer(&self) -> &str {
        &self.dispatch.result.text
    }
}

/// Use case for processing a single document
pub struct ProcessDocumentUseCase {
    dispatcher: Arc<ModelDispatcher>,
    extractor: Arc<dyn ContentExtractor>,
    files: Arc<dyn FileStore>,
    settings: Arc<dyn SettingsRepository>,
    params: DispatchParams,
}

impl ProcessDocumentUseCase {
    pub fn new(
        dispatcher: Arc<ModelDispatcher>,
        extractor: Arc<dyn ContentExtractor>,
        files: Arc<dyn FileStore>,
        settings: Arc<dyn SettingsRepository>,
        params: DispatchParams,
    ) -> Self {
        Self {
            dispatcher,
            extractor,
            files,
            settings,
            params,
        }
    }

    pub fn dispatcher(&self) -> &ModelDispatcher {
        &self.dispatcher
    }

    pub fn files(&self) -> &Arc<dyn FileStore> {
        &self.files
    }

    pub async fn execute(&self, job: &DocumentJob) -> Result<ProcessedDocument, ProcessDocumentError> {
        let file_name = job.file_name();
        info!("Processing {}", job.source.display());

        // 1. Connectivity gate
        if job.family.is_remote() && !self.dispatcher.is_online().await {
            return Err(ProcessDocumentError::Offline);
        }

        // 2. Classify and extract
        let kind = DocumentKind::from_path(&job.source)?;
        let bytes = self.files.read(&job.source)?;
        let text = self.extractor.extract(&bytes, kind)?;
        debug!("Extracted {} chars from {}", text.len(), file_name);

        // 3. Assemble
        let prompt = PromptTemplate::task_prompt(&text, &job.questions);

        // 4. Dispatch
        let dispatch = self.dispatch(&prompt, job.family).await?;

        // 5. Persist the answer
        let output_path = job.output_dir.join(derive_output_name(&file_name));
        self.files.write_text(&output_path, &dispatch.result.text)?;
        info!(
            "Wrote answer from {} to {}",
            dispatch.result.source_model,
            output_path.display()
        );

        // 6. Relocate the source
        let relocated_to = job.completed_dir.join(&file_name);
        let relocated = match job.relocation {
            Relocation::Move => self.files.move_file(&job.source, &relocated_to),
            Relocation::Copy => self.files.copy_file(&job.source, &relocated_to),
        };
        if let Err(source) = relocated {
            warn!(
                "Answer kept at {} but relocation of {} failed: {}",
                output_path.display(),
                job.source.display(),
                source
            );
            return Err(ProcessDocumentError::Relocation {
                output_path,
                source,
            });
        }

        Ok(ProcessedDocument {
            source: job.source.clone(),
            output_path,
            relocated_to,
            dispatch,
        })
    }

    /// Current sequence from the settings store, re-read on every call
    pub fn current_sequence(&self) -> Result<ModelSequence, RepositoryError> {
        Ok(self
            .settings
            .load_model_sequence()?
            .unwrap_or_else(|| self.params.default_sequence.clone()))
    }

    async fn dispatch(
        &self,
        prompt: &str,
        family: ProviderFamily,
    ) -> Result<DispatchOutput, ProcessDocumentError> {
        match family {
            ProviderFamily::Gemini => {
                let input = DispatchInput::new(
                    prompt,
                    self.current_sequence()?,
                    self.params.local_model.clone(),
                )
                .with_temperature(self.params.temperature);
                Ok(self.dispatcher.dispatch_online(&input).await?)
            }
            ProviderFamily::DeepSeek => {
                let result = self
                    .dispatcher
                    .dispatch_local(prompt, self.params.temperature, &self.params.local_model)
                    .await?;
                Ok(DispatchOutput {
                    result,
                    attempts: Vec::new(),
                })
            }
        }
    }
}
