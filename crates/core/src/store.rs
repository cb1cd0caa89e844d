//! SQLite-backed analysis store.
//!
//! All records live in one `analysis` table. SQLite has no array column type, so `topics` and
//! `keywords` are stored as JSON arrays in text columns and decoded on read. Searching uses
//! `json_each` to test array membership, so a term only ever matches a complete element.
//!
//! The store owns a single connection behind a mutex: every batch insert runs in its own
//! transaction and becomes visible to readers all at once.

use crate::config::DatabaseLocation;
use crate::record::{AnalysisDraft, AnalysisRecord};
use crate::{AnalysisError, AnalysisResult};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS analysis (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    summary     TEXT NOT NULL,
    title       TEXT,
    topics      TEXT NOT NULL,
    sentiment   TEXT NOT NULL,
    keywords    TEXT NOT NULL,
    confidence  REAL
);";

const SELECT_COLUMNS: &str = "id, summary, title, topics, sentiment, keywords, confidence";

/// Persistent store of analysis records.
#[derive(Debug)]
pub struct AnalysisStore {
    conn: Mutex<Connection>,
}

impl AnalysisStore {
    /// Open the store at the configured location, creating the schema if needed.
    pub fn open(location: &DatabaseLocation) -> AnalysisResult<Self> {
        match location {
            DatabaseLocation::File(path) => Self::open_file(path),
            DatabaseLocation::InMemory => Self::in_memory(),
        }
    }

    /// Open (or create) a store backed by the given SQLite file.
    pub fn open_file(path: &Path) -> AnalysisResult<Self> {
        let conn = Connection::open(path).map_err(AnalysisError::DatabaseOpen)?;
        tracing::info!("opened analysis store at {}", path.display());
        Self::initialise(conn)
    }

    /// Create a store backed by a private in-memory database.
    pub fn in_memory() -> AnalysisResult<Self> {
        let conn = Connection::open_in_memory().map_err(AnalysisError::DatabaseOpen)?;
        Self::initialise(conn)
    }

    fn initialise(conn: Connection) -> AnalysisResult<Self> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(AnalysisError::SchemaInit)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> AnalysisResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| AnalysisError::StorePoisoned)
    }

    /// Insert every draft in one transaction.
    ///
    /// Either all drafts are stored and returned as records (in input order, with their new ids)
    /// or none are: any failure drops the transaction, which rolls it back.
    pub fn insert_batch(&self, drafts: Vec<AnalysisDraft>) -> AnalysisResult<Vec<AnalysisRecord>> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(AnalysisError::TransactionBegin)?;

        let mut records = Vec::with_capacity(drafts.len());
        {
            let mut stmt = tx
                .prepare_cached(
                    "INSERT INTO analysis (summary, title, topics, sentiment, keywords, confidence)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )
                .map_err(AnalysisError::Insert)?;

            for draft in drafts {
                let topics =
                    serde_json::to_string(draft.topics()).map_err(AnalysisError::Serialization)?;
                let keywords =
                    serde_json::to_string(draft.keywords()).map_err(AnalysisError::Serialization)?;

                stmt.execute(params![
                    draft.summary(),
                    draft.title(),
                    topics,
                    draft.sentiment(),
                    keywords,
                    draft.confidence(),
                ])
                .map_err(AnalysisError::Insert)?;

                records.push(draft.into_record(tx.last_insert_rowid()));
            }
        }

        tx.commit().map_err(AnalysisError::TransactionCommit)?;
        tracing::debug!("committed {} analysis record(s)", records.len());
        Ok(records)
    }

    /// Records having `term` as a whole topic or keyword, in insertion order.
    ///
    /// Matching ignores ASCII case. `term` is bound as a parameter, so quotes, `%` and `_` have
    /// no special meaning.
    pub fn find_by_tag(&self, term: &str) -> AnalysisResult<Vec<AnalysisRecord>> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM analysis a
             WHERE EXISTS (SELECT 1 FROM json_each(a.topics) t WHERE lower(t.value) = lower(?1))
                OR EXISTS (SELECT 1 FROM json_each(a.keywords) k WHERE lower(k.value) = lower(?1))
             ORDER BY a.id"
        );
        let mut stmt = conn.prepare_cached(&sql).map_err(AnalysisError::Query)?;
        let rows = stmt
            .query_map(params![term], RawRecord::from_row)
            .map_err(AnalysisError::Query)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(AnalysisError::Query)?.decode()?);
        }
        Ok(records)
    }

    /// Every record, in insertion order.
    pub fn all(&self) -> AnalysisResult<Vec<AnalysisRecord>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {SELECT_COLUMNS} FROM analysis ORDER BY id");
        let mut stmt = conn.prepare_cached(&sql).map_err(AnalysisError::Query)?;
        let rows = stmt
            .query_map([], RawRecord::from_row)
            .map_err(AnalysisError::Query)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(AnalysisError::Query)?.decode()?);
        }
        Ok(records)
    }

    pub fn count(&self) -> AnalysisResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM analysis", [], |row| row.get(0))
            .map_err(AnalysisError::Query)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

/// A row as stored, before the tag lists are decoded.
struct RawRecord {
    id: i64,
    summary: String,
    title: Option<String>,
    topics: String,
    sentiment: String,
    keywords: String,
    confidence: Option<f64>,
}

impl RawRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            summary: row.get("summary")?,
            title: row.get("title")?,
            topics: row.get("topics")?,
            sentiment: row.get("sentiment")?,
            keywords: row.get("keywords")?,
            confidence: row.get("confidence")?,
        })
    }

    fn decode(self) -> AnalysisResult<AnalysisRecord> {
        let id = self.id;
        let decode_list = |json: &str| {
            serde_json::from_str::<Vec<String>>(json)
                .map_err(|source| AnalysisError::Deserialization { id, source })
        };

        Ok(AnalysisRecord {
            id,
            summary: self.summary,
            title: self.title,
            topics: decode_list(&self.topics)?,
            sentiment: self.sentiment,
            keywords: decode_list(&self.keywords)?,
            confidence: self.confidence,
        })
    }
}
