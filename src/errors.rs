//! Unified application error type.
//! All modules (db, auth, core, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage gateway
    // ---------------------------
    #[error("Could not open database: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("Schema initialization failed: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("Statement failed: {0}")]
    Statement(#[source] rusqlite::Error),

    #[error("Insert failed: {0}")]
    Insert(#[source] rusqlite::Error),

    #[error("Query failed: {0}")]
    Query(#[source] rusqlite::Error),

    #[error("Database busy, timed out: {0}")]
    Timeout(#[source] rusqlite::Error),

    // ---------------------------
    // Authentication
    // ---------------------------
    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not signed in. Run 'agavelog login' first")]
    AuthRequired,

    #[error("Could not persist session: {0}")]
    Session(String),

    // ---------------------------
    // Shift logic
    // ---------------------------
    #[error("Shift {0} not found")]
    ShiftNotFound(i64),

    #[error("Shift {0} is already closed")]
    ShiftClosed(i64),

    #[error("An open shift already exists (shift {0}). End it before starting a new one")]
    ShiftAlreadyOpen(i64),

    #[error("No open shift. Start one with 'agavelog start'")]
    NoOpenShift,

    #[error("Store {0} not found")]
    StoreNotFound(i64),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid role: {0}. Use 'ambassador' or 'supervisor'")]
    InvalidRole(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
