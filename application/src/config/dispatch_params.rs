//! Dispatch parameters for use case control.
//!
//! [`DispatchParams`] groups the static parameters the document processor
//! hands to the dispatcher. The model sequence itself is not here: it is
//! read from the settings store on every document so operator edits apply
//! to the next document.

use casequery_domain::{Model, ModelSequence};

/// Dispatch control parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchParams {
    /// Sampling temperature for remote and local calls.
    pub temperature: f32,
    /// Model used once the remote sequence is exhausted.
    pub local_model: Model,
    /// Sequence used when the settings store holds none.
    pub default_sequence: ModelSequence,
}

impl Default for DispatchParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            local_model: Model::default_local(),
            default_sequence: ModelSequence::new(Model::default_sequence()),
        }
    }
}

impl DispatchParams {
    // ==================== Builder Methods ====================

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_local_model(mut self, model: Model) -> Self {
        self.local_model = model;
        self
    }

    pub fn with_default_sequence(mut self, sequence: ModelSequence) -> Self {
        self.default_sequence = sequence;
        self
    }
}
