//! Gemini REST gateway
//!
//! `POST {base_url}/v1beta/models/{model}:generateContent?key=...` with a
//! single user turn and `generationConfig.temperature`.

use super::{http_client, status_error, transport_error};
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use casequery_application::ports::llm_gateway::{GatewayError, RemoteModelGateway};
use casequery_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub struct GeminiGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiGateway {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &FileGeminiConfig) -> Result<Self, GatewayError> {
        Self::new(
            config.base_url.clone(),
            config.resolve_api_key(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn endpoint(&self, model: &Model) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            model.as_str()
        )
    }
}

#[async_trait]
impl RemoteModelGateway for GeminiGateway {
    async fn generate(
        &self,
        model: &Model,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GatewayError::Configuration("Gemini API key is not configured".to_string())
        })?;

        let body = GenerateRequest::new(prompt, temperature);
        debug!("POST {} ({} prompt chars)", self.endpoint(model), prompt.len());

        let response = self
            .client
            .post(self.endpoint(model))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        parse_generate_response(&text)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str, temperature: f32) -> Self {
        Self {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Concatenate the text parts of the first candidate
fn parse_generate_response(body: &str) -> Result<String, GatewayError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::InvalidResponse(format!("Malformed Gemini response: {}", e)))?;

    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GatewayError::RequestFailed(format!(
            "Prompt blocked by Gemini: {}",
            reason
        )));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::InvalidResponse("Gemini returned no candidates".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GatewayError::InvalidResponse(format!(
            "Gemini returned an empty answer (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateRequest::new("hello", 0.2)).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["contents"][0]["role"], "user");
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_parse_joins_text_parts() {
        let body = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "1. Alice. "}, {"text": "2. Monday."}], "role": "model"},
                "finishReason": "STOP"
            }]
        }"#;
        assert_eq!(parse_generate_response(body).unwrap(), "1. Alice. 2. Monday.");
    }

    #[test]
    fn test_parse_blocked_prompt() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let err = parse_generate_response(body).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_parse_empty_candidate() {
        let body = r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#;
        assert!(matches!(
            parse_generate_response(body),
            Err(GatewayError::InvalidResponse(m)) if m.contains("MAX_TOKENS")
        ));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway =
            GeminiGateway::new("https://example.test/", None, Duration::from_secs(5)).unwrap();
        assert_eq!(
            gateway.endpoint(&Model::Gemini20Flash),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let gateway =
            GeminiGateway::new("http://127.0.0.1:9", None, Duration::from_secs(1)).unwrap();
        let err = gateway
            .generate(&Model::Gemini20Flash, "prompt", 0.2)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Configuration(_)));
    }
}
