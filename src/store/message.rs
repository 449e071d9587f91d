use serde::{Deserialize, Serialize};

use super::Store;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRow {
    pub chat_id: String,
    pub message_id: i64,
    pub timestamp: i64,
    pub text_plain: String,
}

impl Store {
    pub fn insert_messages_batch(&self, messages: &[MessageRow]) -> Result<(), sqlite::Error> {
        self.conn.execute("BEGIN")?;
        match self.write_messages(messages) {
            Ok(()) => self.conn.execute("COMMIT"),
            Err(e) => {
                let _ = self.conn.execute("ROLLBACK");
                Err(e)
            }
        }
    }

    fn write_messages(&self, messages: &[MessageRow]) -> Result<(), sqlite::Error> {
        for msg in messages {
            let mut stmt = self.conn.prepare(
                "INSERT OR IGNORE INTO messages (chat_id, message_id, timestamp, text_plain)
                 VALUES (?, ?, ?, ?)",
            )?;
            stmt.bind((1, msg.chat_id.as_str()))?;
            stmt.bind((2, msg.message_id))?;
            stmt.bind((3, msg.timestamp))?;
            stmt.bind((4, msg.text_plain.as_str()))?;
            stmt.next()?;
        }
        Ok(())
    }

    pub fn get_message(
        &self,
        chat_id: &str,
        message_id: i64,
    ) -> Result<Option<MessageRow>, sqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT chat_id, message_id, timestamp, text_plain
             FROM messages WHERE chat_id = ? AND message_id = ?",
        )?;
        stmt.bind((1, chat_id))?;
        stmt.bind((2, message_id))?;
        if let Ok(sqlite::State::Row) = stmt.next() {
            Ok(Some(MessageRow {
                chat_id: stmt.read::<String, _>(0)?,
                message_id: stmt.read::<i64, _>(1)?,
                timestamp: stmt.read::<i64, _>(2)?,
                text_plain: stmt.read::<String, _>(3)?,
            }))
        } else {
            Ok(None)
        }
    }

    /// Drop a single message from the local cache.
    pub fn evict_message(&self, chat_id: &str, message_id: i64) -> Result<(), sqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("DELETE FROM messages WHERE chat_id = ? AND message_id = ?")?;
        stmt.bind((1, chat_id))?;
        stmt.bind((2, message_id))?;
        stmt.next()?;
        Ok(())
    }

    /// Keep only the newest `keep` messages of a chat.
    pub fn evict_older_than_newest(&self, chat_id: &str, keep: usize) -> Result<(), sqlite::Error> {
        let mut stmt = self.conn.prepare(
            "DELETE FROM messages WHERE chat_id = ? AND message_id NOT IN (
                SELECT message_id FROM messages WHERE chat_id = ?
                ORDER BY timestamp DESC, message_id DESC LIMIT ?
             )",
        )?;
        stmt.bind((1, chat_id))?;
        stmt.bind((2, chat_id))?;
        stmt.bind((3, keep as i64))?;
        stmt.next()?;
        Ok(())
    }

    pub fn message_count(&self) -> Result<i64, sqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT COUNT(*) FROM messages")?;
        stmt.next()?;
        stmt.read::<i64, _>(0)
    }
}
