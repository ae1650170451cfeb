//! Database connection management.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::error::{DbError, Result};

/// Shared handle to a SQLite connection.
///
/// Every query builder and repository in this crate takes a `Database`
/// rather than a bare connection, so one handle can back any number of
/// repositories within a request.
pub type Database = Arc<Mutex<Connection>>;

/// Opens a database file and returns a shared handle.
///
/// Enables WAL journaling for better concurrent read behavior.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Database> {
    let conn = Connection::open(path.as_ref())
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

    Ok(Arc::new(Mutex::new(conn)))
}

/// Opens an in-memory database, primarily for tests.
pub fn open_in_memory() -> Result<Database> {
    let conn =
        Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
    Ok(Arc::new(Mutex::new(conn)))
}
