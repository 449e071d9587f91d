use super::Store;

impl Store {
    /// The "last synchronized" marker of the client session, if one is established.
    pub fn get_sync_marker(&self) -> Result<Option<String>, sqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT last_sync_at FROM sync_state WHERE id = 1")?;
        if let Ok(sqlite::State::Row) = stmt.next() {
            Ok(Some(stmt.read::<String, _>(0)?))
        } else {
            Ok(None)
        }
    }

    pub fn set_sync_marker(&self, last_sync_at: &str) -> Result<(), sqlite::Error> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO sync_state (id, last_sync_at) VALUES (1, ?)
             ON CONFLICT(id) DO UPDATE SET last_sync_at = excluded.last_sync_at",
        )?;
        stmt.bind((1, last_sync_at))?;
        stmt.next()?;
        Ok(())
    }

    /// Forget the marker, e.g. when the connection to the server drops.
    pub fn clear_sync_marker(&self) -> Result<(), sqlite::Error> {
        self.conn.execute("DELETE FROM sync_state")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_absent_by_default() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.get_sync_marker().unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites_and_clear_removes() {
        let store = Store::open_in_memory().unwrap();
        store.set_sync_marker("2025-02-10T12:00:00Z").unwrap();
        store.set_sync_marker("2025-02-10T12:05:00Z").unwrap();
        assert_eq!(
            store.get_sync_marker().unwrap(),
            Some("2025-02-10T12:05:00Z".to_string())
        );

        store.clear_sync_marker().unwrap();
        assert!(store.get_sync_marker().unwrap().is_none());
    }
}
