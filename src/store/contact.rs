use super::Store;

impl Store {
    /// Replace the contact list, keeping the given order.
    pub fn set_contacts(&self, user_ids: &[String]) -> Result<(), sqlite::Error> {
        self.conn.execute("BEGIN")?;
        match self.write_contacts(user_ids) {
            Ok(()) => self.conn.execute("COMMIT"),
            Err(e) => {
                let _ = self.conn.execute("ROLLBACK");
                Err(e)
            }
        }
    }

    fn write_contacts(&self, user_ids: &[String]) -> Result<(), sqlite::Error> {
        self.conn.execute("DELETE FROM contacts")?;
        for (position, user_id) in user_ids.iter().enumerate() {
            let mut stmt = self.conn.prepare(
                "INSERT OR IGNORE INTO contacts (user_id, position) VALUES (?, ?)",
            )?;
            stmt.bind((1, user_id.as_str()))?;
            stmt.bind((2, position as i64))?;
            stmt.next()?;
        }
        Ok(())
    }

    pub fn contact_ids(&self) -> Result<Vec<String>, sqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT user_id FROM contacts ORDER BY position")?;
        let mut ids = Vec::new();
        while let Ok(sqlite::State::Row) = stmt.next() {
            ids.push(stmt.read::<String, _>(0)?);
        }
        Ok(ids)
    }
}
