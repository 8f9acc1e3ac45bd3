//! Configuration file loading for casequery
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./casequery.toml` or `./.casequery.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/casequery/config.toml`
//! 4. Fallback: `~/.config/casequery/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileDispatchConfig, FileGeminiConfig, FileNetworkConfig, FileOllamaConfig,
    FilePathsConfig, FileProvidersConfig, MAX_PROBE_TIMEOUT_SECS,
};
pub use loader::ConfigLoader;
