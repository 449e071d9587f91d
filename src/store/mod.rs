pub mod chat;
pub mod contact;
pub mod import;
pub mod message;
pub mod recent;
pub mod schema;
pub mod settings;
pub mod sync_state;

use std::path::{Path, PathBuf};

/// Local sqlite store backing the chat directory, message cache, contacts,
/// recently-found markers and the session sync marker.
pub struct Store {
    conn: sqlite::Connection,
}

impl Store {
    pub fn open(db_path: &Path) -> Result<Self, sqlite::Error> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = sqlite::open(db_path)?;
        Self::configure(&conn)?;
        schema::run_migrations(&conn)?;
        Ok(Store { conn })
    }

    pub fn open_in_memory() -> Result<Self, sqlite::Error> {
        let conn = sqlite::open(":memory:")?;
        Self::configure(&conn)?;
        schema::run_migrations(&conn)?;
        Ok(Store { conn })
    }

    fn configure(conn: &sqlite::Connection) -> Result<(), sqlite::Error> {
        conn.execute(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -64000;
             PRAGMA foreign_keys = ON;",
        )
    }

    pub fn conn(&self) -> &sqlite::Connection {
        &self.conn
    }
}

pub fn default_db_path() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("telegram-search-surface");
    path.push("search.db");
    path
}

/// Build an error for rows that violate an invariant the schema should enforce.
pub(crate) fn corrupt_row(message: String) -> sqlite::Error {
    sqlite::Error {
        code: None,
        message: Some(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let store = Store::open_in_memory().unwrap();
        let mut stmt = store.conn().prepare("PRAGMA journal_mode").unwrap();
        stmt.next().unwrap();
        let mode = stmt.read::<String, _>(0).unwrap();
        // In-memory databases use "memory" journal mode, not WAL
        assert!(mode == "wal" || mode == "memory");
    }

    #[test]
    fn test_migrations_idempotent() {
        let store = Store::open_in_memory().unwrap();
        schema::run_migrations(store.conn()).unwrap();
        schema::run_migrations(store.conn()).unwrap();
    }

    #[test]
    fn test_default_db_path() {
        let path = default_db_path();
        assert!(path.to_string_lossy().contains("telegram-search-surface"));
        assert!(path.to_string_lossy().ends_with("search.db"));
    }
}
