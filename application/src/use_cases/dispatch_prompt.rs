//! Dispatch Prompt use case
//!
//! Walks the remote model sequence with quota-aware failover and falls
//! back to the local model once every remote option is exhausted.
//!
//! ```text
//! Idle -> TryingModel(0) -> ... -> TryingModel(n-1) -> LocalFallback -> Done
//!              |  success                 | fatal
//!              v                          v
//!             Done                      Done (error)
//! ```

use crate::ports::connectivity::ConnectivityProbe;
use crate::ports::llm_gateway::{ChatMessage, LocalModelRuntime, RemoteModelGateway};
use casequery_domain::{
    AttemptOutcome, DispatchAttempt, DispatchResult, FailureClass, Model, ModelSequence,
    PromptTemplate, classify_failure, truncate,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can surface from a dispatch.
///
/// Quota/rate-limit failures never appear here: they only advance the
/// sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("No network connection; remote models were not contacted")]
    Offline,

    #[error("Model {model} failed: {message}")]
    Fatal { model: Model, message: String },

    #[error("Local model {model} failed: {message}")]
    LocalRuntime { model: Model, message: String },
}

impl DispatchError {
    pub fn is_offline(&self) -> bool {
        matches!(self, DispatchError::Offline)
    }
}

/// Input for one dispatch
#[derive(Debug, Clone)]
pub struct DispatchInput {
    pub prompt: String,
    pub sequence: ModelSequence,
    pub temperature: f32,
    pub local_model: Model,
}

impl DispatchInput {
    pub fn new(prompt: impl Into<String>, sequence: ModelSequence, local_model: Model) -> Self {
        Self {
            prompt: prompt.into(),
            sequence,
            temperature: 0.2,
            local_model,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Successful dispatch with the trail of remote attempts that led to it
#[derive(Debug, Clone)]
pub struct DispatchOutput {
    pub result: DispatchResult,
    pub attempts: Vec<DispatchAttempt>,
}

/// Serial, first-success-wins model dispatcher
pub struct ModelDispatcher {
    probe: Arc<dyn ConnectivityProbe>,
    remote: Arc<dyn RemoteModelGateway>,
    local: Arc<dyn LocalModelRuntime>,
}

impl ModelDispatcher {
    pub fn new(
        probe: Arc<dyn ConnectivityProbe>,
        remote: Arc<dyn RemoteModelGateway>,
        local: Arc<dyn LocalModelRuntime>,
    ) -> Self {
        Self {
            probe,
            remote,
            local,
        }
    }

    /// Run the connectivity probe
    pub async fn is_online(&self) -> bool {
        let online = self.probe.is_reachable().await;
        if !online {
            warn!("Connectivity probe failed");
        }
        online
    }

    /// Full dispatch: probe, walk the sequence, then local fallback
    pub async fn dispatch(&self, input: &DispatchInput) -> Result<DispatchOutput, DispatchError> {
        if !self.is_online().await {
            return Err(DispatchError::Offline);
        }
        self.dispatch_online(input).await
    }

    /// Dispatch for callers that already passed the connectivity probe
    pub async fn dispatch_online(
        &self,
        input: &DispatchInput,
    ) -> Result<DispatchOutput, DispatchError> {
        let mut attempts = Vec::with_capacity(input.sequence.len());

        for model in &input.sequence {
            info!("Trying model {}", model);

            match self
                .remote
                .generate(model, &input.prompt, input.temperature)
                .await
            {
                Ok(text) => {
                    info!("Model {} answered", model);
                    attempts.push(DispatchAttempt::new(
                        model.clone(),
                        AttemptOutcome::Success(text.clone()),
                    ));
                    return Ok(DispatchOutput {
                        result: DispatchResult::remote(model.clone(), text),
                        attempts,
                    });
                }
                Err(e) => {
                    let message = e.to_string();
                    match classify_failure(&message) {
                        FailureClass::Retryable => {
                            warn!(
                                "Model {} hit a quota/rate limit, moving on: {}",
                                model,
                                truncate(&message, 200)
                            );
                            attempts.push(DispatchAttempt::new(
                                model.clone(),
                                AttemptOutcome::QuotaExceeded(message),
                            ));
                        }
                        FailureClass::Fatal => {
                            warn!("Model {} failed, aborting dispatch: {}", model, message);
                            return Err(DispatchError::Fatal {
                                model: model.clone(),
                                message,
                            });
                        }
                    }
                }
            }
        }

        if input.sequence.is_empty() {
            debug!("Empty model sequence, going straight to local fallback");
        } else {
            info!(
                "All {} remote models exhausted, falling back to {}",
                input.sequence.len(),
                input.local_model
            );
        }

        let result = self
            .dispatch_local(&input.prompt, input.temperature, &input.local_model)
            .await?;
        Ok(DispatchOutput { result, attempts })
    }

    /// Ask the local model directly. Its errors are terminal.
    pub async fn dispatch_local(
        &self,
        prompt: &str,
        temperature: f32,
        model: &Model,
    ) -> Result<DispatchResult, DispatchError> {
        let messages = [
            ChatMessage::system(PromptTemplate::analysis_system()),
            ChatMessage::user(prompt),
        ];

        let text = self
            .local
            .chat(model, &messages, temperature)
            .await
            .map_err(|e| DispatchError::LocalRuntime {
                model: model.clone(),
                message: e.to_string(),
            })?;

        info!("Local model {} answered", model);
        Ok(DispatchResult::local(model.clone(), text))
    }
}
