/// Storage: SQLite key-value backend, in-memory fake and the saved palette repository.
mod kv;
mod migrations;
mod saved;

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub use kv::{KeyValueStore, SqliteStore};
pub use saved::SavedPalettes;

#[cfg(test)]
pub use kv::MemoryStore;
#[cfg(test)]
pub use saved::SAVED_PALETTES_KEY;

/// Opens (or creates) the SQLite database and runs migrations.
pub fn init(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let conn = Connection::open(db_path)
        .with_context(|| format!("opening database {}", db_path.display()))?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}
