//! SQLite bootstrap and schema migrations for the blob store.
//!
//! # Responsibility
//! - Open file or in-memory connections with required settings.
//! - Apply schema migrations before any blob access.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - A connection is only handed out after migrations succeed.

pub mod migrations;

use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Duration;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Opens the on-disk blob database and applies pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let result = Connection::open(path)
        .map_err(DbError::from)
        .and_then(bootstrap);
    log_open("file", &result);
    result
}

/// Opens an in-memory blob database, used by tests and the smoke probe.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let result = Connection::open_in_memory()
        .map_err(DbError::from)
        .and_then(bootstrap);
    log_open("memory", &result);
    result
}

fn bootstrap(mut conn: Connection) -> DbResult<Connection> {
    conn.busy_timeout(Duration::from_secs(5))?;
    migrations::apply_migrations(&mut conn)?;
    Ok(conn)
}

fn log_open(mode: &str, result: &DbResult<Connection>) {
    match result {
        Ok(_) => info!("event=db_open module=db status=ok mode={mode}"),
        Err(err) => error!("event=db_open module=db status=error mode={mode} error={err}"),
    }
}
