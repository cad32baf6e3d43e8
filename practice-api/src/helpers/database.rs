use crate::storage::migrations::run_migrations;
use crate::DbConnection;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

pub fn initialize_database(db_path: &Path) -> anyhow::Result<DbConnection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    run_migrations(&mut conn)?;

    info!(path = %db_path.display(), "Database ready");
    Ok(Arc::new(Mutex::new(conn)))
}

/// Migrated in-memory database, used by tests and dry runs
pub fn open_in_memory() -> anyhow::Result<DbConnection> {
    let mut conn = Connection::open_in_memory()?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    run_migrations(&mut conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}
