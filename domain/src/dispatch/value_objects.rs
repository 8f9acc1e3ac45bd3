//! Dispatch value objects

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Result of one remote attempt; never persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success(String),
    QuotaExceeded(String),
    OtherFailure(String),
}

/// One model tried during a dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchAttempt {
    pub model: Model,
    pub outcome: AttemptOutcome,
}

impl DispatchAttempt {
    pub fn new(model: Model, outcome: AttemptOutcome) -> Self {
        Self { model, outcome }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Success(_))
    }
}

/// Answer produced by a dispatch, tagged with the model that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub source_model: Model,
    pub text: String,
    /// Whether the answer came from the local fallback
    pub local_fallback: bool,
}

impl DispatchResult {
    pub fn remote(model: Model, text: impl Into<String>) -> Self {
        Self {
            source_model: model,
            text: text.into(),
            local_fallback: false,
        }
    }

    pub fn local(model: Model, text: impl Into<String>) -> Self {
        Self {
            source_model: model,
            text: text.into(),
            local_fallback: true,
        }
    }
}
