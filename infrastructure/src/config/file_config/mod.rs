//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; conversion into domain and application
//! types happens in the binary.

mod dispatch;
mod network;
mod paths;
mod providers;

pub use dispatch::FileDispatchConfig;
pub use network::{FileNetworkConfig, MAX_PROBE_TIMEOUT_SECS};
pub use paths::FilePathsConfig;
pub use providers::{FileGeminiConfig, FileOllamaConfig, FileProvidersConfig};

use casequery_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Input, output and archive locations
    pub paths: FilePathsConfig,
    /// Dispatch knobs and the seed model sequence
    pub dispatch: FileDispatchConfig,
    /// Connectivity probe settings
    pub network: FileNetworkConfig,
    /// Remote and local model endpoints
    pub providers: FileProvidersConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.paths.validate());
        issues.extend(self.dispatch.validate());
        issues.extend(self.network.validate());
        issues
    }
}
