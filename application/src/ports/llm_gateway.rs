//! LLM Gateway ports
//!
//! Defines the interfaces for communicating with remote model providers and
//! with the locally hosted runtime.

use async_trait::async_trait;
use casequery_domain::Model;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
///
/// Providers only give us error text; the dispatcher classifies the
/// rendered message, so adapters keep the provider's wording intact.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Timeout")]
    Timeout,
}

/// Role of a chat message sent to the local runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
        }
    }
}

/// One chat message for the local runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Gateway for remote model generation
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait RemoteModelGateway: Send + Sync {
    /// Generate a completion for a single prompt
    async fn generate(
        &self,
        model: &Model,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, GatewayError>;
}

/// Locally hosted model runtime
///
/// Returns only the answer: any reasoning segment is already stripped.
#[async_trait]
pub trait LocalModelRuntime: Send + Sync {
    async fn chat(
        &self,
        model: &Model,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, GatewayError>;
}
