//! SQLite-backed question catalogs and settings
//!
//! One database file holds a question table per provider family and an
//! `app_settings` key/value table. Every catalog mutation and the renumber
//! pass that follows it run in a single transaction.

use casequery_application::ports::question_repository::{
    QuestionRepository, RepositoryError, SettingsRepository,
};
use casequery_domain::{ModelSequence, ProviderFamily, Question, renumber};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

const MODEL_SEQUENCE_KEY: &str = "model_sequence";

fn storage_error(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

/// Shared handle to the application database
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database file and ensure the schema exists
    pub fn open(path: &Path) -> Result<Self, RepositoryError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(storage_error)?;
        }
        let conn = Connection::open(path).map_err(storage_error)?;
        debug!("Opened database {}", path.display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, RepositoryError> {
        Self::init(Connection::open_in_memory().map_err(storage_error)?)
    }

    fn init(conn: Connection) -> Result<Self, RepositoryError> {
        for family in ProviderFamily::ALL {
            conn.execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {} (
                        id INTEGER PRIMARY KEY,
                        external_id TEXT NOT NULL,
                        text TEXT NOT NULL
                    )",
                    family.question_table()
                ),
                [],
            )
            .map_err(storage_error)?;
        }

        conn.execute(
            "CREATE TABLE IF NOT EXISTS app_settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .map_err(storage_error)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, RepositoryError> {
        self.conn
            .lock()
            .map_err(|_| RepositoryError::Storage("database lock poisoned".to_string()))
    }
}

/// Question catalog of one provider family
pub struct SqliteQuestionStore {
    db: Database,
    family: ProviderFamily,
}

impl SqliteQuestionStore {
    pub fn new(db: Database, family: ProviderFamily) -> Self {
        Self { db, family }
    }

    fn table(&self) -> &'static str {
        self.family.question_table()
    }

    fn not_found(&self, id: u32) -> RepositoryError {
        RepositoryError::NotFound {
            family: self.family,
            id,
        }
    }

    fn load(&self, conn: &Connection) -> Result<Vec<Question>, RepositoryError> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT id, external_id, text FROM {} ORDER BY id",
                self.table()
            ))
            .map_err(storage_error)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Question {
                    id: row.get(0)?,
                    external_id: row.get(1)?,
                    text: row.get(2)?,
                })
            })
            .map_err(storage_error)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(storage_error)
    }

    /// Rewrite the table with dense ids in the current order
    fn renumber_in(&self, tx: &Transaction) -> Result<Vec<Question>, RepositoryError> {
        let mut questions = self.load(tx)?;
        renumber(&mut questions);

        tx.execute(&format!("DELETE FROM {}", self.table()), [])
            .map_err(storage_error)?;
        {
            let mut insert = tx
                .prepare(&format!(
                    "INSERT INTO {} (id, external_id, text) VALUES (?1, ?2, ?3)",
                    self.table()
                ))
                .map_err(storage_error)?;
            for q in &questions {
                insert
                    .execute(params![q.id, q.external_id, q.text])
                    .map_err(storage_error)?;
            }
        }
        Ok(questions)
    }

    fn validated(text: &str) -> Result<&str, RepositoryError> {
        Question::validate_text(text)
            .ok_or_else(|| RepositoryError::InvalidInput("question text must not be empty".into()))
    }
}

impl QuestionRepository for SqliteQuestionStore {
    fn family(&self) -> ProviderFamily {
        self.family
    }

    fn list(&self) -> Result<Vec<Question>, RepositoryError> {
        let conn = self.db.lock()?;
        self.load(&conn)
    }

    fn add(&self, text: &str) -> Result<Question, RepositoryError> {
        let text = Self::validated(text)?;
        let mut conn = self.db.lock()?;
        let tx = conn.transaction().map_err(storage_error)?;

        tx.execute(
            &format!(
                "INSERT INTO {table} (id, external_id, text)
                 VALUES ((SELECT COALESCE(MAX(id), 0) + 1 FROM {table}), '', ?1)",
                table = self.table()
            ),
            params![text],
        )
        .map_err(storage_error)?;

        let questions = self.renumber_in(&tx)?;
        tx.commit().map_err(storage_error)?;

        questions
            .into_iter()
            .last()
            .ok_or_else(|| storage_error("inserted question vanished"))
    }

    fn update(&self, id: u32, text: &str) -> Result<Question, RepositoryError> {
        let text = Self::validated(text)?;
        let mut conn = self.db.lock()?;
        let tx = conn.transaction().map_err(storage_error)?;

        let changed = tx
            .execute(
                &format!("UPDATE {} SET text = ?1 WHERE id = ?2", self.table()),
                params![text, id],
            )
            .map_err(storage_error)?;
        if changed == 0 {
            return Err(self.not_found(id));
        }

        let questions = self.renumber_in(&tx)?;
        tx.commit().map_err(storage_error)?;

        questions
            .into_iter()
            .find(|q| q.id == id)
            .ok_or_else(|| self.not_found(id))
    }

    fn delete(&self, id: u32) -> Result<(), RepositoryError> {
        let mut conn = self.db.lock()?;
        let tx = conn.transaction().map_err(storage_error)?;

        let changed = tx
            .execute(
                &format!("DELETE FROM {} WHERE id = ?1", self.table()),
                params![id],
            )
            .map_err(storage_error)?;
        if changed == 0 {
            return Err(self.not_found(id));
        }

        self.renumber_in(&tx)?;
        tx.commit().map_err(storage_error)
    }

    fn renumber(&self) -> Result<(), RepositoryError> {
        let mut conn = self.db.lock()?;
        let tx = conn.transaction().map_err(storage_error)?;
        self.renumber_in(&tx)?;
        tx.commit().map_err(storage_error)
    }
}

/// Application settings (currently the model sequence)
pub struct SqliteSettingsStore {
    db: Database,
}

impl SqliteSettingsStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Remove the stored sequence so the configured default applies again
    pub fn clear_model_sequence(&self) -> Result<(), RepositoryError> {
        let conn = self.db.lock()?;
        conn.execute(
            "DELETE FROM app_settings WHERE key = ?1",
            params![MODEL_SEQUENCE_KEY],
        )
        .map_err(storage_error)?;
        Ok(())
    }
}

impl SettingsRepository for SqliteSettingsStore {
    fn load_model_sequence(&self) -> Result<Option<ModelSequence>, RepositoryError> {
        let conn = self.db.lock()?;
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM app_settings WHERE key = ?1",
                params![MODEL_SEQUENCE_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(storage_error)?;

        value
            .map(|json| serde_json::from_str::<ModelSequence>(&json).map_err(storage_error))
            .transpose()
    }

    fn save_model_sequence(&self, sequence: &ModelSequence) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(sequence).map_err(storage_error)?;
        let conn = self.db.lock()?;
        conn.execute(
            "INSERT INTO app_settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![MODEL_SEQUENCE_KEY, json],
        )
        .map_err(storage_error)?;
        debug!("Saved model sequence {}", sequence);
        Ok(())
    }
}
