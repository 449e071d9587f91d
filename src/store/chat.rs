use serde::{Deserialize, Serialize};

use super::{corrupt_row, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

impl ChatKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatKind::Private => "private",
            ChatKind::Group => "group",
            ChatKind::Supergroup => "supergroup",
            ChatKind::Channel => "channel",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "private" => Some(ChatKind::Private),
            "group" => Some(ChatKind::Group),
            "supergroup" => Some(ChatKind::Supergroup),
            "channel" => Some(ChatKind::Channel),
            _ => None,
        }
    }
}

/// A chat or user as known to the local directory.
/// Private chats share their id with the user they talk to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: String,
    pub title: String,
    pub kind: ChatKind,
    pub username: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    /// Unix timestamp of the latest message, used for recency ordering.
    pub last_message_at: Option<i64>,
}

impl Store {
    pub fn upsert_chat(&self, chat: &ChatRecord) -> Result<(), sqlite::Error> {
        let mut stmt = self.conn.prepare(
            "INSERT INTO chats (chat_id, title, chat_type, username, is_verified, last_message_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(chat_id) DO UPDATE SET
                title = excluded.title,
                chat_type = excluded.chat_type,
                username = excluded.username,
                is_verified = excluded.is_verified,
                last_message_at = excluded.last_message_at",
        )?;
        stmt.bind((1, chat.id.as_str()))?;
        stmt.bind((2, chat.title.as_str()))?;
        stmt.bind((3, chat.kind.as_str()))?;
        match &chat.username {
            Some(u) => stmt.bind((4, u.as_str()))?,
            None => stmt.bind((4, sqlite::Value::Null))?,
        };
        stmt.bind((5, chat.is_verified as i64))?;
        match chat.last_message_at {
            Some(ts) => stmt.bind((6, ts))?,
            None => stmt.bind((6, sqlite::Value::Null))?,
        };
        stmt.next()?;
        Ok(())
    }

    pub fn get_chat(&self, chat_id: &str) -> Result<Option<ChatRecord>, sqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT chat_id, title, chat_type, username, is_verified, last_message_at
             FROM chats WHERE chat_id = ?",
        )?;
        stmt.bind((1, chat_id))?;
        if let Ok(sqlite::State::Row) = stmt.next() {
            Ok(Some(read_chat_record(&stmt)?))
        } else {
            Ok(None)
        }
    }

    /// Ids of every known chat, most recently active first.
    pub fn chat_ids_by_activity(&self) -> Result<Vec<String>, sqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT chat_id FROM chats
             ORDER BY last_message_at IS NULL, last_message_at DESC, chat_id",
        )?;
        let mut ids = Vec::new();
        while let Ok(sqlite::State::Row) = stmt.next() {
            ids.push(stmt.read::<String, _>(0)?);
        }
        Ok(ids)
    }

    pub fn chat_count(&self) -> Result<i64, sqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT COUNT(*) FROM chats")?;
        stmt.next()?;
        stmt.read::<i64, _>(0)
    }
}

fn read_chat_record(stmt: &sqlite::Statement) -> Result<ChatRecord, sqlite::Error> {
    let kind = stmt.read::<String, _>("chat_type")?;
    Ok(ChatRecord {
        id: stmt.read::<String, _>("chat_id")?,
        title: stmt.read::<String, _>("title")?,
        kind: ChatKind::parse(&kind)
            .ok_or_else(|| corrupt_row(format!("unknown chat type '{}'", kind)))?,
        username: stmt.read::<Option<String>, _>("username")?,
        is_verified: stmt.read::<i64, _>("is_verified")? != 0,
        last_message_at: stmt.read::<Option<i64>, _>("last_message_at")?,
    })
}
