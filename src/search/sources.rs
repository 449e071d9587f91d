//! Read-side collaborators of the search surface.
//!
//! Aggregation never reaches for global state: the chat directory, message
//! cache, name filter, sorter and sync marker are all passed in through these
//! traits. Implementations are provided for the sqlite [`Store`] and for plain
//! in-memory snapshots.

use std::cmp::Reverse;
use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;

use super::messages::MessageHit;
use super::Identifier;
use crate::store::chat::ChatRecord;
use crate::store::Store;

pub trait ChatDirectory {
    fn lookup(&self, id: &str) -> Option<ChatRecord>;
}

/// `byChatId[chat_id].byId[message_id]` lookups into locally cached messages.
pub trait MessageCache {
    fn message(&self, chat_id: &str, message_id: i64) -> Option<MessageHit>;
}

/// Narrows a candidate id list to the ids whose display name matches `query`.
pub trait NameFilter {
    fn filter(
        &self,
        ids: &[Identifier],
        directory: &dyn ChatDirectory,
        query: &str,
    ) -> Vec<Identifier>;
}

/// Orders result ids. `pinned` ids that are present come first, in the given order.
/// `is_global` marks remote directory results.
pub trait ChatSort {
    fn sort(
        &self,
        ids: Vec<Identifier>,
        directory: &dyn ChatDirectory,
        is_global: bool,
        pinned: &[Identifier],
    ) -> Vec<Identifier>;
}

pub trait SyncMarkerSource {
    fn last_sync(&self) -> Option<String>;
}

impl ChatDirectory for HashMap<String, ChatRecord> {
    fn lookup(&self, id: &str) -> Option<ChatRecord> {
        self.get(id).cloned()
    }
}

impl ChatDirectory for Store {
    fn lookup(&self, id: &str) -> Option<ChatRecord> {
        self.get_chat(id).unwrap_or_else(|e| {
            log::warn!("chat lookup failed for {}: {}", id, e);
            None
        })
    }
}

/// Messages of one chat, keyed by message id.
#[derive(Debug, Clone, Default)]
pub struct ChatMessages {
    pub by_id: HashMap<i64, MessageHit>,
}

#[derive(Debug, Clone, Default)]
pub struct MessageCacheSnapshot {
    pub by_chat_id: HashMap<String, ChatMessages>,
}

impl MessageCacheSnapshot {
    pub fn insert(&mut self, hit: MessageHit) {
        self.by_chat_id
            .entry(hit.chat_id.clone())
            .or_default()
            .by_id
            .insert(hit.message_id, hit);
    }
}

impl MessageCache for MessageCacheSnapshot {
    fn message(&self, chat_id: &str, message_id: i64) -> Option<MessageHit> {
        self.by_chat_id.get(chat_id)?.by_id.get(&message_id).cloned()
    }
}

impl MessageCache for Store {
    fn message(&self, chat_id: &str, message_id: i64) -> Option<MessageHit> {
        match self.get_message(chat_id, message_id) {
            Ok(row) => row.map(MessageHit::from),
            Err(e) => {
                log::warn!("message lookup failed for {}_{}: {}", chat_id, message_id, e);
                None
            }
        }
    }
}

impl SyncMarkerSource for Option<String> {
    fn last_sync(&self) -> Option<String> {
        self.clone()
    }
}

impl SyncMarkerSource for Store {
    fn last_sync(&self) -> Option<String> {
        self.get_sync_marker().unwrap_or_else(|e| {
            log::warn!("sync marker read failed: {}", e);
            None
        })
    }
}

/// Case-insensitive word-prefix match over chat titles, plus username prefix.
///
/// Every word of the query must start some word of the title, so "ali co"
/// matches "Alice Cooper". A leading `@` is ignored. An empty query keeps
/// every id that exists in the directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayNameFilter;

impl NameFilter for DisplayNameFilter {
    fn filter(
        &self,
        ids: &[Identifier],
        directory: &dyn ChatDirectory,
        query: &str,
    ) -> Vec<Identifier> {
        let normalized = query.trim().to_lowercase();
        let bare = normalized.trim_start_matches('@');
        let query_words: Vec<&str> = bare.unicode_words().collect();

        ids.iter()
            .filter(|id| match directory.lookup(id) {
                Some(record) => bare.is_empty() || name_matches(&record, bare, &query_words),
                None => false,
            })
            .cloned()
            .collect()
    }
}

fn name_matches(record: &ChatRecord, bare: &str, query_words: &[&str]) -> bool {
    if let Some(username) = &record.username {
        if username.to_lowercase().starts_with(bare) {
            return true;
        }
    }
    if query_words.is_empty() {
        return false;
    }
    let title = record.title.to_lowercase();
    let title_words: Vec<&str> = title.unicode_words().collect();
    query_words
        .iter()
        .all(|q| title_words.iter().any(|w| w.starts_with(q)))
}

fn pin_rank(id: &str, pinned: &[Identifier]) -> usize {
    pinned
        .iter()
        .position(|p| p == id)
        .unwrap_or(usize::MAX)
}

/// Pinned ids first, everything else in the order it was given.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionOrderSort;

impl ChatSort for InsertionOrderSort {
    fn sort(
        &self,
        mut ids: Vec<Identifier>,
        _directory: &dyn ChatDirectory,
        _is_global: bool,
        pinned: &[Identifier],
    ) -> Vec<Identifier> {
        ids.sort_by_key(|id| pin_rank(id, pinned));
        ids
    }
}

/// Pinned ids first, then verified chats for global results, then the most
/// recently active. Ids missing from the directory sink to the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecencySort;

impl ChatSort for RecencySort {
    fn sort(
        &self,
        ids: Vec<Identifier>,
        directory: &dyn ChatDirectory,
        is_global: bool,
        pinned: &[Identifier],
    ) -> Vec<Identifier> {
        let mut keyed: Vec<_> = ids
            .into_iter()
            .map(|id| {
                let record = directory.lookup(&id);
                let verified_first = !(is_global && record.as_ref().is_some_and(|r| r.is_verified));
                let last_activity = record.and_then(|r| r.last_message_at);
                (
                    (pin_rank(&id, pinned), verified_first, Reverse(last_activity)),
                    id,
                )
            })
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed.into_iter().map(|(_, id)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::chat::ChatKind;
    use crate::store::message::MessageRow;

    fn ids(values: &[&str]) -> Vec<Identifier> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn record(id: &str, title: &str, username: Option<&str>, last: Option<i64>) -> ChatRecord {
        ChatRecord {
            id: id.to_string(),
            title: title.to_string(),
            kind: ChatKind::Private,
            username: username.map(str::to_string),
            is_verified: false,
            last_message_at: last,
        }
    }

    fn directory(records: Vec<ChatRecord>) -> HashMap<String, ChatRecord> {
        records.into_iter().map(|r| (r.id.clone(), r)).collect()
    }

    #[test]
    fn test_name_filter_prefix_match() {
        let dir = directory(vec![
            record("u1", "Alice", None, None),
            record("u2", "Bob", None, None),
        ]);
        let found = DisplayNameFilter.filter(&ids(&["u1", "u2"]), &dir, "al");
        assert_eq!(found, ids(&["u1"]));
    }

    #[test]
    fn test_name_filter_multi_word_and_case() {
        let dir = directory(vec![
            record("u1", "Alice Cooper", None, None),
            record("u2", "Alice Smith", None, None),
        ]);
        let found = DisplayNameFilter.filter(&ids(&["u1", "u2"]), &dir, "ALI co");
        assert_eq!(found, ids(&["u1"]));
    }

    #[test]
    fn test_name_filter_username_with_mention_marker() {
        let dir = directory(vec![
            record("u1", "Someone", Some("durov"), None),
            record("u2", "Durham", None, None),
        ]);
        assert_eq!(
            DisplayNameFilter.filter(&ids(&["u1", "u2"]), &dir, "@dur"),
            ids(&["u1", "u2"])
        );
        assert_eq!(
            DisplayNameFilter.filter(&ids(&["u1", "u2"]), &dir, "@duro"),
            ids(&["u1"])
        );
    }

    #[test]
    fn test_name_filter_no_substring_inside_word() {
        let dir = directory(vec![record("u1", "Malice", None, None)]);
        assert!(DisplayNameFilter.filter(&ids(&["u1"]), &dir, "al").is_empty());
    }

    #[test]
    fn test_name_filter_skips_unknown_ids() {
        let dir = directory(vec![record("u1", "Alice", None, None)]);
        assert_eq!(
            DisplayNameFilter.filter(&ids(&["ghost", "u1"]), &dir, ""),
            ids(&["u1"])
        );
    }

    #[test]
    fn test_insertion_order_sort_pins_first() {
        let dir = directory(vec![]);
        let sorted =
            InsertionOrderSort.sort(ids(&["u1", "c1", "me", "c2"]), &dir, false, &ids(&["me"]));
        assert_eq!(sorted, ids(&["me", "u1", "c1", "c2"]));
    }

    #[test]
    fn test_recency_sort() {
        let dir = directory(vec![
            record("old", "Old", None, Some(100)),
            record("new", "New", None, Some(300)),
            record("me", "Saved Messages", None, Some(1)),
        ]);
        let sorted = RecencySort.sort(
            ids(&["old", "unknown", "me", "new"]),
            &dir,
            false,
            &ids(&["me"]),
        );
        assert_eq!(sorted, ids(&["me", "new", "old", "unknown"]));
    }

    #[test]
    fn test_recency_sort_puts_verified_first_for_global() {
        let mut verified = record("v", "Verified", None, Some(10));
        verified.is_verified = true;
        let dir = directory(vec![verified, record("r", "Recent", None, Some(500))]);

        assert_eq!(
            RecencySort.sort(ids(&["r", "v"]), &dir, true, &[]),
            ids(&["v", "r"])
        );
        assert_eq!(
            RecencySort.sort(ids(&["v", "r"]), &dir, false, &[]),
            ids(&["r", "v"])
        );
    }

    #[test]
    fn test_message_cache_snapshot_lookup() {
        let mut cache = MessageCacheSnapshot::default();
        cache.insert(MessageHit {
            chat_id: "c1".to_string(),
            message_id: 5,
            timestamp: 100,
            text: "hi".to_string(),
        });
        assert_eq!(cache.message("c1", 5).map(|m| m.timestamp), Some(100));
        assert!(cache.message("c1", 6).is_none());
        assert!(cache.message("c2", 5).is_none());
    }

    #[test]
    fn test_store_backed_collaborators() {
        let store = Store::open_in_memory().unwrap();
        store
            .upsert_chat(&record("c1", "Group", None, Some(5)))
            .unwrap();
        store
            .insert_messages_batch(&[MessageRow {
                chat_id: "c1".to_string(),
                message_id: 9,
                timestamp: 300,
                text_plain: "hello".to_string(),
            }])
            .unwrap();

        assert_eq!(store.lookup("c1").map(|c| c.title), Some("Group".to_string()));
        assert!(store.lookup("c2").is_none());
        assert_eq!(store.message("c1", 9).map(|m| m.text), Some("hello".to_string()));
        assert!(store.last_sync().is_none());
        store.set_sync_marker("t1").unwrap();
        assert_eq!(store.last_sync(), Some("t1".to_string()));
    }
}
