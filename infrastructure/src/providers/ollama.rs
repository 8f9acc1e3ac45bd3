//! Ollama local runtime
//!
//! Non-streaming `/api/chat`. Reasoning models wrap their chain of thought
//! in `<think>...</think>`; only the text after the closing tag is returned.

use super::{http_client, status_error, transport_error};
use crate::config::FileOllamaConfig;
use async_trait::async_trait;
use casequery_application::ports::llm_gateway::{ChatMessage, GatewayError, LocalModelRuntime};
use casequery_domain::{Model, strip_reasoning};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub struct OllamaRuntime {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaRuntime {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &FileOllamaConfig) -> Result<Self, GatewayError> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }
}

#[async_trait]
impl LocalModelRuntime for OllamaRuntime {
    async fn chat(
        &self,
        model: &Model,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, GatewayError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = ChatRequest::new(model, messages, temperature);
        debug!("POST {} model={}", url, model);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        parse_chat_response(&text)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    options: ChatOptions,
}

impl<'a> ChatRequest<'a> {
    fn new(model: &'a Model, messages: &'a [ChatMessage], temperature: f32) -> Self {
        Self {
            model: model.as_str(),
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            stream: false,
            options: ChatOptions { temperature },
        }
    }
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

fn parse_chat_response(body: &str) -> Result<String, GatewayError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::InvalidResponse(format!("Malformed Ollama response: {}", e)))?;

    if let Some(error) = response.error {
        return Err(GatewayError::RequestFailed(error));
    }

    let content = response
        .message
        .map(|m| m.content)
        .ok_or_else(|| GatewayError::InvalidResponse("Ollama returned no message".to_string()))?;

    Ok(strip_reasoning(&content))
}
