use super::Store;

pub const SEARCH_CONFIG_KEY: &str = "search_config";

impl Store {
    pub fn get_setting(&self, key: &str) -> Result<Option<String>, sqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM app_meta WHERE key = ?")?;
        stmt.bind((1, key))?;
        if let Ok(sqlite::State::Row) = stmt.next() {
            Ok(Some(stmt.read::<String, _>(0)?))
        } else {
            Ok(None)
        }
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), sqlite::Error> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO app_meta (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )?;
        stmt.bind((1, key))?;
        stmt.bind((2, value))?;
        stmt.next()?;
        Ok(())
    }

    pub fn remove_setting(&self, key: &str) -> Result<(), sqlite::Error> {
        let mut stmt = self.conn.prepare("DELETE FROM app_meta WHERE key = ?")?;
        stmt.bind((1, key))?;
        stmt.next()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_config_setting() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.get_setting(SEARCH_CONFIG_KEY).unwrap().is_none());

        store
            .set_setting(SEARCH_CONFIG_KEY, r#"{"less_list_items_amount":3}"#)
            .unwrap();
        store
            .set_setting(SEARCH_CONFIG_KEY, r#"{"less_list_items_amount":8}"#)
            .unwrap();
        assert_eq!(
            store.get_setting(SEARCH_CONFIG_KEY).unwrap().as_deref(),
            Some(r#"{"less_list_items_amount":8}"#)
        );

        store.remove_setting(SEARCH_CONFIG_KEY).unwrap();
        assert!(store.get_setting(SEARCH_CONFIG_KEY).unwrap().is_none());
    }
}
