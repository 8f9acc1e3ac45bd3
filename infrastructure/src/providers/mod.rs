//! Model provider adapters
//!
//! [`GeminiGateway`] implements the remote gateway port over the Gemini
//! REST API; [`OllamaRuntime`] implements the local runtime port.

pub mod gemini;
pub mod ollama;

pub use gemini::GeminiGateway;
pub use ollama::OllamaRuntime;

use casequery_application::ports::llm_gateway::GatewayError;
use std::time::Duration;

const USER_AGENT: &str = concat!("casequery/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client construction for every provider
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| GatewayError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

/// Map a transport-level reqwest error
pub(crate) fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// Render a non-success response keeping the provider's own wording
pub(crate) fn status_error(status: reqwest::StatusCode, body: &str) -> GatewayError {
    GatewayError::RequestFailed(format!("HTTP {}: {}", status, body.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use casequery_domain::{FailureClass, classify_failure};

    #[test]
    fn test_status_error_keeps_provider_vocabulary() {
        let err = status_error(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#,
        );
        let message = err.to_string();
        assert!(message.contains("HTTP 429"));
        assert_eq!(classify_failure(&message), FailureClass::Retryable);
    }

    #[test]
    fn test_bare_429_is_retryable() {
        let err = status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, "");
        let message = err.to_string();
        assert!(message.contains("429 Too Many Requests"));
        assert_eq!(classify_failure(&message), FailureClass::Retryable);
    }

    #[test]
    fn test_status_error_for_bad_key_is_fatal() {
        let err = status_error(reqwest::StatusCode::BAD_REQUEST, "API key not valid");
        assert_eq!(classify_failure(&err.to_string()), FailureClass::Fatal);
    }
}
