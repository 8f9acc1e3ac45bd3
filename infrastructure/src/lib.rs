//! Infrastructure layer for casequery
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod extract;
pub mod network;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use extract::DocumentTextExtractor;
pub use network::HttpConnectivityProbe;
pub use providers::{GeminiGateway, OllamaRuntime};
pub use storage::{Database, LocalFileStore, SqliteQuestionStore, SqliteSettingsStore};
