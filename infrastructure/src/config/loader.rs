//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_FILES: [&str; 2] = ["casequery.toml", ".casequery.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./casequery.toml` or `./.casequery.toml`
    /// 3. Global config: `<config dir>/casequery/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Global config file path (may not exist)
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("casequery").join("config.toml"))
    }

    /// Project-level config file path, if one exists
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    }

    /// Human-readable list of the sources, highest priority first
    pub fn describe_sources(explicit: Option<&Path>) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(path) = explicit {
            let state = if path.exists() { "FOUND" } else { "MISSING" };
            lines.push(format!("[{state:^7}] Explicit: {}", path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("[ FOUND ] Project: {}", path.display())),
            None => lines.push("[       ] Project: ./casequery.toml or ./.casequery.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let state = if path.exists() { " FOUND " } else { "       " };
            lines.push(format!("[{state}] Global:  {}", path.display()));
        }

        lines.push("[       ] Default: built-in defaults".to_string());
        lines
    }
}
