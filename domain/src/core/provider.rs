//! Provider family value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A named group of persisted questions and a model backend class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderFamily {
    /// Remote cloud models walked in sequence with local fallback
    #[default]
    Gemini,
    /// Locally hosted model, no remote endpoint involved
    DeepSeek,
}

impl ProviderFamily {
    pub const ALL: [ProviderFamily; 2] = [ProviderFamily::Gemini, ProviderFamily::DeepSeek];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderFamily::Gemini => "gemini",
            ProviderFamily::DeepSeek => "deepseek",
        }
    }

    /// Display label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            ProviderFamily::Gemini => "Gemini",
            ProviderFamily::DeepSeek => "DeepSeek",
        }
    }

    /// Storage table holding this family's catalog
    pub fn question_table(&self) -> &'static str {
        match self {
            ProviderFamily::Gemini => "gemini_questions",
            ProviderFamily::DeepSeek => "deepseek_questions",
        }
    }

    /// Whether dispatch for this family contacts remote endpoints
    pub fn is_remote(&self) -> bool {
        matches!(self, ProviderFamily::Gemini)
    }
}

impl std::fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ProviderFamily {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(ProviderFamily::Gemini),
            "deepseek" | "deep-seek" => Ok(ProviderFamily::DeepSeek),
            other => Err(DomainError::UnknownProviderFamily(other.to_string())),
        }
    }
}
