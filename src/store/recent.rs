use super::Store;

impl Store {
    /// Mark a chat as recently found. Re-adding an id moves it to the front.
    pub fn add_recently_found(&self, chat_id: &str) -> Result<(), sqlite::Error> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO recently_found (chat_id, seq)
             VALUES (?, (SELECT COALESCE(MAX(seq), 0) + 1 FROM recently_found))
             ON CONFLICT(chat_id) DO UPDATE SET seq = excluded.seq",
        )?;
        stmt.bind((1, chat_id))?;
        stmt.next()?;
        Ok(())
    }

    /// Recently found chat ids, most recent first.
    pub fn recently_found_chat_ids(&self, limit: usize) -> Result<Vec<String>, sqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT chat_id FROM recently_found ORDER BY seq DESC LIMIT ?")?;
        stmt.bind((1, limit as i64))?;
        let mut ids = Vec::new();
        while let Ok(sqlite::State::Row) = stmt.next() {
            ids.push(stmt.read::<String, _>(0)?);
        }
        Ok(ids)
    }

    pub fn clear_recently_found(&self) -> Result<(), sqlite::Error> {
        self.conn.execute("DELETE FROM recently_found")
    }
}
