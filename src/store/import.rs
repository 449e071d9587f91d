use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::chat::ChatRecord;
use super::message::MessageRow;
use super::Store;

/// A message removed upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    pub chat_id: String,
    pub message_id: i64,
}

/// Directory and message cache data pulled from the client in one go.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportBatch {
    pub chats: Vec<ChatRecord>,
    /// Replaces the stored contact list when present.
    pub contacts: Option<Vec<String>>,
    pub messages: Vec<MessageRow>,
    pub deleted: Vec<MessageRef>,
    /// Sync marker the client reached with this batch.
    pub synced_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub chats: i64,
    pub messages: i64,
}

impl Store {
    /// Write a batch into the directory and message cache.
    ///
    /// With `keep_per_chat`, every chat that received messages is trimmed to
    /// its newest `keep_per_chat` messages afterwards.
    pub fn import_batch(
        &self,
        batch: &ImportBatch,
        keep_per_chat: Option<usize>,
    ) -> Result<ImportStats, sqlite::Error> {
        for chat in &batch.chats {
            self.upsert_chat(chat)?;
        }
        if let Some(contacts) = &batch.contacts {
            self.set_contacts(contacts)?;
        }

        self.insert_messages_batch(&batch.messages)?;
        for gone in &batch.deleted {
            self.evict_message(&gone.chat_id, gone.message_id)?;
        }
        if let Some(keep) = keep_per_chat {
            let touched: BTreeSet<&str> =
                batch.messages.iter().map(|m| m.chat_id.as_str()).collect();
            for chat_id in touched {
                self.evict_older_than_newest(chat_id, keep)?;
            }
        }

        if let Some(marker) = &batch.synced_at {
            self.set_sync_marker(marker)?;
        }

        let stats = ImportStats {
            chats: self.chat_count()?,
            messages: self.message_count()?,
        };
        log::info!(
            "imported {} chats, {} messages ({} chats, {} messages stored)",
            batch.chats.len(),
            batch.messages.len(),
            stats.chats,
            stats.messages
        );
        Ok(stats)
    }
}
