//! Dispatch configuration from TOML (`[dispatch]` section)

use casequery_domain::{ConfigIssue, ConfigIssueCode, Model, ModelSequence};
use serde::{Deserialize, Serialize};

const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDispatchConfig {
    /// Sampling temperature for every model call
    pub temperature: f32,
    /// Local model used after the remote sequence is exhausted
    pub local_model: String,
    /// Seed sequence used while the settings store holds none
    pub default_sequence: Vec<String>,
}

impl Default for FileDispatchConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            local_model: Model::default_local().to_string(),
            default_sequence: Model::default_sequence()
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl FileDispatchConfig {
    pub fn local_model(&self) -> Model {
        Model::from(self.local_model.trim())
    }

    /// Parsed default sequence; blank entries are dropped
    pub fn default_sequence(&self) -> ModelSequence {
        ModelSequence::parse(&self.default_sequence)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "dispatch.temperature".to_string(),
                },
                format!(
                    "dispatch.temperature: {} is outside 0.0..=2.0",
                    self.temperature
                ),
            ));
        }

        if self.local_model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "dispatch.local_model".to_string(),
                },
                "dispatch.local_model: a local fallback model is required",
            ));
        } else if self.local_model().is_gemini() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MisplacedModel {
                    field: "dispatch.local_model".to_string(),
                    model: self.local_model.clone(),
                },
                format!(
                    "dispatch.local_model: {} is a hosted Gemini model, not a local one",
                    self.local_model
                ),
            ));
        }

        for model in self.default_sequence().iter().filter(|m| m.is_local()) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MisplacedModel {
                    field: "dispatch.default_sequence".to_string(),
                    model: model.to_string(),
                },
                format!("dispatch.default_sequence: {model} is a local model and will fail remotely"),
            ));
        }

        let blanks = self
            .default_sequence
            .iter()
            .filter(|m| m.trim().is_empty())
            .count();
        if blanks > 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::BlankEntry {
                    field: "dispatch.default_sequence".to_string(),
                },
                format!("dispatch.default_sequence: {blanks} blank entries ignored"),
            ));
        }

        issues
    }
}
