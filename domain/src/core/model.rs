//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Known LLM models (Value Object)
///
/// Remote identifiers are Gemini endpoints walked by the dispatcher;
/// local identifiers are tags understood by the local runtime.
/// Anything else is carried verbatim in [`Model::Custom`], so an
/// administrator can put any identifier into the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Gemini models
    Gemini25Pro,
    Gemini25Flash,
    Gemini20Flash,
    Gemini20FlashLite,
    Gemini15Pro,
    Gemini15Flash,
    // Local models
    DeepSeekR1,
    DeepSeekR1Small,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Gemini20FlashLite => "gemini-2.0-flash-lite",
            Model::Gemini15Pro => "gemini-1.5-pro",
            Model::Gemini15Flash => "gemini-1.5-flash",
            Model::DeepSeekR1 => "deepseek-r1:7b",
            Model::DeepSeekR1Small => "deepseek-r1:1.5b",
            Model::Custom(s) => s,
        }
    }

    /// Default remote sequence seeded into a fresh settings store
    pub fn default_sequence() -> Vec<Model> {
        vec![Model::Gemini20Flash, Model::Gemini15Flash]
    }

    /// Default local fallback model
    pub fn default_local() -> Model {
        Model::DeepSeekR1
    }

    /// Check if this is a Gemini model
    pub fn is_gemini(&self) -> bool {
        match self {
            Model::Gemini25Pro
            | Model::Gemini25Flash
            | Model::Gemini20Flash
            | Model::Gemini20FlashLite
            | Model::Gemini15Pro
            | Model::Gemini15Flash => true,
            Model::Custom(s) => s.starts_with("gemini-"),
            _ => false,
        }
    }

    /// Check if this is a locally hosted model
    pub fn is_local(&self) -> bool {
        match self {
            Model::DeepSeekR1 | Model::DeepSeekR1Small => true,
            Model::Custom(s) => s.starts_with("deepseek-r1"),
            _ => false,
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.0-flash" => Model::Gemini20Flash,
            "gemini-2.0-flash-lite" => Model::Gemini20FlashLite,
            "gemini-1.5-pro" => Model::Gemini15Pro,
            "gemini-1.5-flash" => Model::Gemini15Flash,
            "deepseek-r1:7b" => Model::DeepSeekR1,
            "deepseek-r1:1.5b" => Model::DeepSeekR1Small,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}

/// Ordered list of remote model identifiers tried by the dispatcher.
///
/// Duplicates are allowed and kept; the dispatcher walks the list
/// exactly as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelSequence(Vec<Model>);

impl ModelSequence {
    pub fn new(models: Vec<Model>) -> Self {
        Self(models)
    }

    /// Parse identifiers, dropping blank entries
    pub fn parse<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            ids.into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .map(|s| Model::from(s.as_str()))
                .collect(),
        )
    }

    pub fn models(&self) -> &[Model] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Model> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ModelSequence {
    type Item = &'a Model;
    type IntoIter = std::slice::Iter<'a, Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for ModelSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<&str> = self.0.iter().map(|m| m.as_str()).collect();
        write!(f, "[{}]", ids.join(", "))
    }
}
