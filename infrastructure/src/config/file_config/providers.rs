//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};

/// Google Gemini REST API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the Generative Language API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            request_timeout_secs: 120,
        }
    }
}

impl FileGeminiConfig {
    /// Direct key first, then the configured environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Local Ollama runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    pub base_url: String,
    /// Local reasoning models are slow; keep this generous.
    pub request_timeout_secs: u64,
}

impl Default for FileOllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            request_timeout_secs: 600,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub gemini: FileGeminiConfig,
    pub ollama: FileOllamaConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_key_wins() {
        let config = FileGeminiConfig {
            api_key: Some("direct".into()),
            api_key_env: "CASEQUERY_TEST_UNSET_VAR".into(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("direct"));
    }

    #[test]
    fn test_missing_key_resolves_to_none() {
        let config = FileGeminiConfig {
            api_key: Some("  ".into()),
            api_key_env: "CASEQUERY_TEST_UNSET_VAR".into(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), None);
    }
}
