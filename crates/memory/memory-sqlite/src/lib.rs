//! # SQLite Long-Term Memory Storage
//!
//! Durable, append-only log of mission outcomes with scores, queried by exact
//! mission description.
//!
//! ## Database Schema
//!
//! ```sql
//! CREATE TABLE long_term_memories (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     mission_description TEXT,
//!     metadata TEXT,      -- JSON object
//!     datetime TEXT,
//!     score REAL
//! );
//! ```
//!
//! ## Connections
//!
//! Every operation opens its own connection and closes it before returning; no
//! connection is held between calls. Concurrent processes are therefore safe at the
//! granularity of single statements, but a save followed by a load is not atomic.
//!
//! ## Failure policy
//!
//! Backend errors never escape as panics or raw `sqlx` errors. Each operation logs a
//! `MEMORY ERROR` event with the operation name and cause, then returns a typed
//! outcome: [`Lookup::Unavailable`] for loads and [`MemoryError`] for writes. The
//! long-term memory store decides which of those degrade and which propagate.

use memory_core::{Lookup, LongTermRecord, MemoryError, MemoryKind, Metadata};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{Connection, Row};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Current schema version, stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 2;

/// SQLite storage for long-term memory records.
#[derive(Debug, Clone)]
pub struct LtmSqliteStorage {
    db_path: PathBuf,
    options: SqliteConnectOptions,
}

impl LtmSqliteStorage {
    /// Creates a storage handle for `db_path` without touching the file.
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        let db_path = db_path.as_ref().to_path_buf();
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);
        Self { db_path, options }
    }

    /// Creates a storage handle and initializes the schema.
    ///
    /// An initialization failure is logged, not returned: later operations will
    /// report the same fault through their own outcomes.
    pub async fn open(db_path: impl AsRef<Path>) -> Self {
        let storage = Self::new(db_path);
        if let Err(e) = storage.initialize().await {
            error!(
                operation = "initialize",
                db_path = %storage.db_path.display(),
                error = %e,
                "MEMORY ERROR: An error occurred during database initialization"
            );
        }
        storage
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Idempotently creates (or evolves) the schema. Safe on every process start.
    ///
    /// - creates the parent directory of the database file when missing
    /// - creates `long_term_memories` and its `mission_description` index
    /// - adds the `score` column to tables written before it existed
    pub async fn initialize(&self) -> Result<(), MemoryError> {
        if let Some(parent) = self.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MemoryError::backend(MemoryKind::LongTerm, e))?;
        }

        let mut conn = self.connect().await?;
        let result = Self::migrate(&mut conn).await;
        Self::close(conn).await;
        result.map_err(|e| MemoryError::backend(MemoryKind::LongTerm, e))?;

        debug!(db_path = %self.db_path.display(), "Long-term memory schema ready");
        Ok(())
    }

    async fn migrate(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS long_term_memories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                mission_description TEXT,
                metadata TEXT,
                datetime TEXT,
                score REAL
            )
            "#,
        )
        .execute(&mut *conn)
        .await?;

        let columns = sqlx::query("PRAGMA table_info(long_term_memories)")
            .fetch_all(&mut *conn)
            .await?;
        let has_score = columns
            .iter()
            .any(|row| row.try_get::<String, _>("name").map(|n| n == "score").unwrap_or(false));
        if !has_score {
            info!("Adding score column to legacy long_term_memories table");
            sqlx::query("ALTER TABLE long_term_memories ADD COLUMN score REAL")
                .execute(&mut *conn)
                .await?;
        }

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_ltm_mission_description \
             ON long_term_memories(mission_description)",
        )
        .execute(&mut *conn)
        .await?;

        sqlx::query(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Appends one record. Metadata is stored as JSON text.
    pub async fn save(
        &self,
        mission_description: &str,
        metadata: &Metadata,
        datetime: &str,
        score: f64,
    ) -> Result<(), MemoryError> {
        let result = self
            .try_save(mission_description, metadata, datetime, score)
            .await;
        if let Err(e) = &result {
            error!(
                operation = "save",
                error = %e,
                "MEMORY ERROR: An error occurred while saving to LTM"
            );
        }
        result
    }

    async fn try_save(
        &self,
        mission_description: &str,
        metadata: &Metadata,
        datetime: &str,
        score: f64,
    ) -> Result<(), MemoryError> {
        let encoded = serde_json::to_string(metadata)?;
        let mut conn = self.connect().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO long_term_memories (mission_description, metadata, datetime, score)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(mission_description)
        .bind(encoded)
        .bind(datetime)
        .bind(score)
        .execute(&mut conn)
        .await;
        Self::close(conn).await;
        result.map_err(|e| MemoryError::backend(MemoryKind::LongTerm, e))?;
        Ok(())
    }

    /// Records for exactly `mission_description`, newest `datetime` first and, among
    /// equal datetimes, lowest `score` first; at most `latest_n` rows.
    ///
    /// `Available(vec![])` when nothing matches.
    pub async fn load(&self, mission_description: &str, latest_n: usize) -> Lookup<Vec<LongTermRecord>> {
        match self.try_load(mission_description, latest_n).await {
            Ok(records) => {
                debug!(
                    operation = "load",
                    latest_n,
                    count = records.len(),
                    "Long-term memory load returned"
                );
                Lookup::Available(records)
            }
            Err(e) => {
                error!(
                    operation = "load",
                    error = %e,
                    "MEMORY ERROR: An error occurred while querying LTM"
                );
                Lookup::Unavailable(e)
            }
        }
    }

    async fn try_load(
        &self,
        mission_description: &str,
        latest_n: usize,
    ) -> Result<Vec<LongTermRecord>, MemoryError> {
        if latest_n == 0 {
            return Ok(Vec::new());
        }
        let limit = i64::try_from(latest_n).unwrap_or(i64::MAX);

        let mut conn = self.connect().await?;
        let rows = sqlx::query(
            r#"
            SELECT metadata, datetime, score
            FROM long_term_memories
            WHERE mission_description = ?
            ORDER BY datetime DESC, score ASC
            LIMIT ?
            "#,
        )
        .bind(mission_description)
        .bind(limit)
        .fetch_all(&mut conn)
        .await;
        Self::close(conn).await;
        let rows = rows.map_err(|e| MemoryError::backend(MemoryKind::LongTerm, e))?;

        rows.iter().map(Self::row_to_record).collect()
    }

    fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<LongTermRecord, MemoryError> {
        let decode = |e: sqlx::Error| MemoryError::backend(MemoryKind::LongTerm, e);
        let metadata: Option<String> = row.try_get("metadata").map_err(decode)?;
        let datetime: Option<String> = row.try_get("datetime").map_err(decode)?;
        let score: Option<f64> = row.try_get("score").map_err(decode)?;

        let metadata: Metadata = match metadata {
            Some(text) if !text.is_empty() => serde_json::from_str(&text)?,
            _ => Metadata::new(),
        };

        Ok(LongTermRecord {
            metadata,
            datetime: datetime.unwrap_or_default(),
            score: score.unwrap_or_default(),
        })
    }

    /// Deletes every row; the schema is kept.
    pub async fn reset(&self) -> Result<(), MemoryError> {
        let result = self.try_reset().await;
        match &result {
            Ok(deleted) => info!(operation = "reset", deleted, "Long-term memory reset"),
            Err(e) => error!(
                operation = "reset",
                error = %e,
                "MEMORY ERROR: An error occurred while deleting all rows in LTM"
            ),
        }
        result.map(|_| ())
    }

    async fn try_reset(&self) -> Result<u64, MemoryError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query("DELETE FROM long_term_memories")
            .execute(&mut conn)
            .await;
        Self::close(conn).await;
        result
            .map(|r| r.rows_affected())
            .map_err(|e| MemoryError::backend(MemoryKind::LongTerm, e))
    }

    async fn connect(&self) -> Result<SqliteConnection, MemoryError> {
        SqliteConnection::connect_with(&self.options)
            .await
            .map_err(|e| MemoryError::backend(MemoryKind::LongTerm, e))
    }

    async fn close(conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            debug!(error = %e, "Closing long-term memory connection failed");
        }
    }
}
