//! Persistence adapters: SQLite stores and the local filesystem

mod local_fs;
mod sqlite;

pub use local_fs::LocalFileStore;
pub use sqlite::{Database, SqliteQuestionStore, SqliteSettingsStore};
