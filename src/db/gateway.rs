//! Storage gateway: owns the single SQLite connection and exposes the
//! generic execute/insert/query primitives used by every other module.
//!
//! The connection is opened lazily, at most once, behind a mutex. A failed
//! open leaves the gateway unopened so a later call can retry. All writes
//! are serialized through the same lock.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, Row, ToSql, Transaction};

use crate::errors::{AppError, AppResult};

pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

pub struct Storage {
    path: PathBuf,
    busy_timeout: Duration,
    conn: Mutex<Option<Connection>>,
}

impl Storage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_busy_timeout(path, Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))
    }

    pub fn with_busy_timeout(path: impl AsRef<Path>, busy_timeout: Duration) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout,
            conn: Mutex::new(None),
        }
    }

    /// Idempotent open: the first call acquires the connection, later calls
    /// are no-ops on the cached handle.
    pub fn open(&self) -> AppResult<()> {
        self.with_conn(|_| Ok(()))
    }

    fn connect(&self) -> AppResult<Connection> {
        let conn = Connection::open(&self.path).map_err(AppError::Connection)?;
        conn.busy_timeout(self.busy_timeout)
            .map_err(AppError::Connection)?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(AppError::Connection)?;
        Ok(conn)
    }

    /// Run a closure against the lazily opened connection. The connection is
    /// taken out of the slot for the duration of the call and put back after,
    /// so an open failure never marks the gateway as initialized.
    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let mut conn = match guard.take() {
            Some(conn) => conn,
            None => self.connect()?,
        };
        let result = f(&mut conn);
        *guard = Some(conn);
        result
    }

    /// Run a non-query statement (DDL or parametrized UPDATE/DELETE).
    /// Returns the number of affected rows.
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> AppResult<usize> {
        self.with_conn(|conn| {
            conn.execute(sql, params)
                .map_err(|e| classify(e, AppError::Statement))
        })
    }

    /// Insert a row into `table` from column/value pairs and return the newly
    /// assigned identifier, read back with an explicit last-insert lookup.
    pub fn insert(&self, table: &str, columns: &[(&str, &dyn ToSql)]) -> AppResult<i64> {
        self.with_conn(|conn| insert_into(conn, table, columns))
    }

    /// Run a read-only statement and map every row.
    pub fn query<T>(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
        map: impl FnMut(&Row) -> rusqlite::Result<T>,
    ) -> AppResult<Vec<T>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql).map_err(|e| classify(e, AppError::Query))?;
            let rows = stmt
                .query_map(params, map)
                .map_err(|e| classify(e, AppError::Query))?;

            let mut out = Vec::new();
            for r in rows {
                out.push(r.map_err(|e| classify(e, AppError::Query))?);
            }
            Ok(out)
        })
    }

    /// Run a read-only statement and map the first row, or None.
    pub fn get_first<T>(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
        map: impl FnOnce(&Row) -> rusqlite::Result<T>,
    ) -> AppResult<Option<T>> {
        self.with_conn(|conn| {
            conn.query_row(sql, params, map)
                .optional()
                .map_err(|e| classify(e, AppError::Query))
        })
    }

    /// Run a closure inside a transaction. Commit on Ok, rollback on Err.
    pub fn with_tx<T>(&self, f: impl FnOnce(&Transaction) -> AppResult<T>) -> AppResult<T> {
        self.with_conn(|conn| {
            let tx = conn
                .transaction()
                .map_err(|e| classify(e, AppError::Statement))?;
            let value = f(&tx)?;
            tx.commit().map_err(|e| classify(e, AppError::Statement))?;
            Ok(value)
        })
    }
}

/// Build and run a parameter-bound INSERT on a raw connection. Shared by
/// Storage::insert and the transactional paths (a Transaction derefs to
/// a Connection).
pub fn insert_into(
    conn: &Connection,
    table: &str,
    columns: &[(&str, &dyn ToSql)],
) -> AppResult<i64> {
    let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        names.join(", "),
        placeholders.join(", ")
    );

    let values = rusqlite::params_from_iter(columns.iter().map(|(_, value)| *value));
    conn.execute(&sql, values)
        .map_err(|e| classify(e, AppError::Insert))?;

    conn.query_row("SELECT last_insert_rowid()", [], |row| row.get(0))
        .map_err(|e| classify(e, AppError::Insert))
}

/// Map a driver error into the gateway taxonomy, routing lock-wait
/// exhaustion to Timeout regardless of the operation.
pub(crate) fn classify(err: rusqlite::Error, fallback: fn(rusqlite::Error) -> AppError) -> AppError {
    if is_busy(&err) {
        AppError::Timeout(err)
    } else {
        fallback(err)
    }
}

fn is_busy(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(f, _)
            if matches!(
                f.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            )
    )
}
