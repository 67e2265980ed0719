// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Log archive — append-only SQLite copy of the audit records seen by this
// machine, searchable without the backend.
//
// Schema:
//   log_archive(
//     seq            INTEGER PRIMARY KEY AUTOINCREMENT,
//     record_id      TEXT UNIQUE,        -- backend _id, NULL if absent
//     timestamp      TEXT    NOT NULL,   -- RFC 3339 UTC, microseconds
//     path           TEXT,
//     method         TEXT,
//     ip             TEXT,
//     blueprint      TEXT,
//     org_id         TEXT,
//     user_id        TEXT,
//     is_login_event INTEGER NOT NULL,   -- 0 / 1
//     message        TEXT,
//     code           TEXT
//   )
//
// Timestamps that cannot be parsed are stored as received.

use std::path::Path;

use auditdeck_core::error::AuditDeckError;
use auditdeck_core::types::LogRecord;
use rusqlite::{Connection, Row, params, params_from_iter};
use tracing::{debug, instrument};

use crate::query::{SearchQuery, storage_timestamp};

// ---------------------------------------------------------------------------
// Local error helpers
// ---------------------------------------------------------------------------

/// Convert a `rusqlite::Error` into an `AuditDeckError::Database`.
fn db_err(e: rusqlite::Error) -> AuditDeckError {
    AuditDeckError::Database(e.to_string())
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS log_archive (
        seq            INTEGER PRIMARY KEY AUTOINCREMENT,
        record_id      TEXT UNIQUE,
        timestamp      TEXT    NOT NULL,
        path           TEXT,
        method         TEXT,
        ip             TEXT,
        blueprint      TEXT,
        org_id         TEXT,
        user_id        TEXT,
        is_login_event INTEGER NOT NULL,
        message        TEXT,
        code           TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_log_archive_timestamp ON log_archive (timestamp);
    CREATE INDEX IF NOT EXISTS idx_log_archive_user ON log_archive (user_id, timestamp);";

const COLUMNS: &str = "record_id, timestamp, path, method, ip, blueprint, org_id, user_id, \
                       is_login_event, message, code";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Append-only archive of audit log records backed by a SQLite database.
///
/// Records are keyed by their backend `_id`; inserting a record that is
/// already archived is a no-op, so overlapping imports and a live feed that
/// replays recent history do not create duplicates.
pub struct LogArchive {
    conn: Connection,
}

impl LogArchive {
    /// Open (or create) the archive database at `path`.
    ///
    /// WAL mode is enabled so a running `tail` does not block searches.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AuditDeckError> {
        let conn = Connection::open(path).map_err(db_err)?;

        conn.execute_batch("PRAGMA journal_mode = WAL;")
            .map_err(db_err)?;
        conn.execute_batch(SCHEMA).map_err(db_err)?;

        debug!("log archive opened");
        Ok(Self { conn })
    }

    /// Open an in-memory archive (useful for tests).
    pub fn open_in_memory() -> Result<Self, AuditDeckError> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        conn.execute_batch(SCHEMA).map_err(db_err)?;

        debug!("in-memory log archive opened");
        Ok(Self { conn })
    }

    /// Archive one record. Returns `false` if a record with the same `_id`
    /// was already present.
    #[instrument(skip_all, fields(id = record.id.as_deref().unwrap_or("-")))]
    pub fn insert(&self, record: &LogRecord) -> Result<bool, AuditDeckError> {
        let inserted = insert_with(&self.conn, record)?;
        debug!(inserted, "archive insert");
        Ok(inserted)
    }

    /// Archive a batch of records in one transaction. Returns how many were
    /// new.
    #[instrument(skip_all, fields(batch = records.len()))]
    pub fn insert_all(&mut self, records: &[LogRecord]) -> Result<usize, AuditDeckError> {
        let tx = self.conn.transaction().map_err(db_err)?;
        let mut inserted = 0;
        for record in records {
            if insert_with(&tx, record)? {
                inserted += 1;
            }
        }
        tx.commit().map_err(db_err)?;

        debug!(inserted, "archive batch committed");
        Ok(inserted)
    }

    /// Run a historical search.
    #[instrument(skip(self))]
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<LogRecord>, AuditDeckError> {
        let mut conditions = Vec::new();
        let mut values = Vec::new();

        if let Some(ref user) = query.user_id {
            conditions.push("user_id = ?");
            values.push(user.clone());
        }
        if let Some(start) = query.start {
            conditions.push("timestamp >= ?");
            values.push(storage_timestamp(start));
        }
        if let Some(end) = query.end_inclusive() {
            conditions.push("timestamp <= ?");
            values.push(storage_timestamp(end));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let order = query.order.sql();
        // A zero limit means no limit.
        let limit_clause = match query.limit {
            0 => String::new(),
            limit => format!("LIMIT {limit}"),
        };
        let sql = format!(
            "SELECT {COLUMNS} FROM log_archive {where_clause}
             ORDER BY timestamp {order}, seq {order}
             {limit_clause}"
        );

        let mut stmt = self.conn.prepare(&sql).map_err(db_err)?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), row_to_record)
            .map_err(db_err)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(db_err)?);
        }
        debug!(results = records.len(), "archive search");
        Ok(records)
    }

    /// The most recent `limit` records, newest first.
    pub fn recent(&self, limit: u32) -> Result<Vec<LogRecord>, AuditDeckError> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {COLUMNS} FROM log_archive
                 ORDER BY timestamp DESC, seq DESC
                 LIMIT ?1"
            ))
            .map_err(db_err)?;

        let rows = stmt
            .query_map(params![limit], row_to_record)
            .map_err(db_err)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(db_err)?);
        }
        Ok(records)
    }

    /// Every archived record, oldest first.
    pub fn all(&self) -> Result<Vec<LogRecord>, AuditDeckError> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {COLUMNS} FROM log_archive ORDER BY timestamp ASC, seq ASC"
            ))
            .map_err(db_err)?;

        let rows = stmt.query_map([], row_to_record).map_err(db_err)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(db_err)?);
        }
        Ok(records)
    }

    /// Total number of archived records.
    pub fn count(&self) -> Result<u64, AuditDeckError> {
        self.conn
            .query_row("SELECT COUNT(*) FROM log_archive", [], |row| row.get(0))
            .map_err(db_err)
    }
}

fn insert_with(conn: &Connection, record: &LogRecord) -> Result<bool, AuditDeckError> {
    let timestamp = match record.parsed_timestamp() {
        Some(ts) => storage_timestamp(ts),
        None => record.timestamp.clone().unwrap_or_default(),
    };
    let login_int: i32 = if record.is_login_event { 1 } else { 0 };

    let changed = conn
        .execute(
            &format!(
                "INSERT OR IGNORE INTO log_archive ({COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
            ),
            params![
                record.id,
                timestamp,
                record.path,
                record.method,
                record.ip,
                record.blueprint,
                record.org_id,
                record.user_id,
                login_int,
                record.message,
                record.code,
            ],
        )
        .map_err(db_err)?;
    Ok(changed > 0)
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<LogRecord> {
    let timestamp: String = row.get(1)?;
    Ok(LogRecord {
        id: row.get(0)?,
        timestamp: (!timestamp.is_empty()).then_some(timestamp),
        path: row.get(2)?,
        method: row.get(3)?,
        ip: row.get(4)?,
        blueprint: row.get(5)?,
        org_id: row.get(6)?,
        user_id: row.get(7)?,
        is_login_event: row.get::<_, i32>(8)? != 0,
        message: row.get(9)?,
        code: row.get(10)?,
    })
}
