//! HTTP connectivity probe
//!
//! A short-timeout HEAD request against a well-known host. Any transport
//! failure counts as offline; any HTTP status counts as reachable.

use crate::config::{FileNetworkConfig, MAX_PROBE_TIMEOUT_SECS};
use async_trait::async_trait;
use casequery_application::ports::connectivity::ConnectivityProbe;
use casequery_application::ports::llm_gateway::GatewayError;
use std::time::Duration;
use tracing::debug;

pub struct HttpConnectivityProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpConnectivityProbe {
    /// Timeouts above the maximum are clamped
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let timeout = timeout.min(Duration::from_secs(MAX_PROBE_TIMEOUT_SECS));
        Ok(Self {
            client: crate::providers::http_client(timeout)?,
            url: url.into(),
        })
    }

    pub fn from_config(config: &FileNetworkConfig) -> Result<Self, GatewayError> {
        Self::new(config.probe_url.clone(), config.probe_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ConnectivityProbe for HttpConnectivityProbe {
    async fn is_reachable(&self) -> bool {
        match self.client.head(&self.url).send().await {
            Ok(response) => {
                debug!("Probe {} answered {}", self.url, response.status());
                true
            }
            Err(e) => {
                debug!("Probe {} failed: {}", self.url, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_target_reports_offline() {
        // Port 9 (discard) on localhost is closed in test environments
        let probe = HttpConnectivityProbe::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        assert!(!probe.is_reachable().await);
    }

    #[test]
    fn test_from_config() {
        let probe = HttpConnectivityProbe::from_config(&FileNetworkConfig::default()).unwrap();
        assert_eq!(probe.url(), "https://www.google.com");
    }
}
