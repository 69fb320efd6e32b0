use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::errors::ServerError;

/// Schema applied at startup. Every statement is idempotent.
const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Handle to the on-disk ticket store. Holds only the path; each call
/// opens its own connection and closes it on return.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Provides a fresh connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        let mut conn = Connection::open(&self.path)
            .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
        f(&mut conn)
    }
}

/// Create the database file (if absent) and apply the schema.
pub fn init_db(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })?;

    tracing::info!(path = %db.path().display(), "database initialized");
    Ok(())
}
