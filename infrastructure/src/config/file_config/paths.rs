//! Filesystem locations from TOML (`[paths]` section)

use casequery_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePathsConfig {
    /// Default root for bulk runs
    pub input_dir: PathBuf,
    /// Answer files
    pub output_dir: PathBuf,
    /// Relocated source documents
    pub completed_dir: PathBuf,
    /// SQLite database holding questions and settings
    pub database: PathBuf,
}

impl Default for FilePathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            completed_dir: PathBuf::from("completed"),
            database: PathBuf::from("casequery.db"),
        }
    }
}

impl FilePathsConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("paths.input_dir", &self.input_dir),
            ("paths.output_dir", &self.output_dir),
            ("paths.completed_dir", &self.completed_dir),
            ("paths.database", &self.database),
        ]
        .into_iter()
        .filter(|(_, path)| path.as_os_str().is_empty())
        .map(|(field, _)| {
            ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: field.to_string(),
                },
                format!("{field}: path must not be empty"),
            )
        })
        .collect()
    }
}
