//! Connectivity probe configuration from TOML (`[network]` section)

use casequery_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for the probe timeout
pub const MAX_PROBE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNetworkConfig {
    /// Well-known host checked before any remote call
    pub probe_url: String,
    /// Probe timeout; values above the maximum are clamped
    pub probe_timeout_secs: u64,
}

impl Default for FileNetworkConfig {
    fn default() -> Self {
        Self {
            probe_url: "https://www.google.com".to_string(),
            probe_timeout_secs: MAX_PROBE_TIMEOUT_SECS,
        }
    }
}

impl FileNetworkConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs.clamp(1, MAX_PROBE_TIMEOUT_SECS))
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.probe_timeout_secs > MAX_PROBE_TIMEOUT_SECS {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "network.probe_timeout_secs".to_string(),
                },
                format!(
                    "network.probe_timeout_secs: {} exceeds {}s, clamped",
                    self.probe_timeout_secs, MAX_PROBE_TIMEOUT_SECS
                ),
            ));
        }

        if self.probe_url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "network.probe_url".to_string(),
                },
                "network.probe_url: a probe target is required",
            ));
        }

        issues
    }
}
