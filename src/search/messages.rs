use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use super::query::SearchQuery;
use super::sources::{ChatDirectory, MessageCache};
use crate::store::chat::ChatRecord;
use crate::store::message::MessageRow;

/// A message search result resolved from the local cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHit {
    pub chat_id: String,
    pub message_id: i64,
    pub timestamp: i64,
    pub text: String,
}

impl From<MessageRow> for MessageHit {
    fn from(row: MessageRow) -> Self {
        MessageHit {
            chat_id: row.chat_id,
            message_id: row.message_id,
            timestamp: row.timestamp,
            text: row.text_plain,
        }
    }
}

/// Resolved message tier, newest first.
pub type HitList = Arc<[MessageHit]>;

static EMPTY_HITS: LazyLock<HitList> = LazyLock::new(|| Arc::from(Vec::new()));

pub fn empty_hits() -> HitList {
    Arc::clone(&EMPTY_HITS)
}

/// Key of a message hit, written `chatId_messageId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchToken {
    pub chat_id: String,
    pub message_id: i64,
}

impl SearchToken {
    /// Split at the last `_`, so chat ids may themselves contain underscores
    /// or a leading minus sign.
    pub fn parse(token: &str) -> Option<Self> {
        let (chat_id, message_id) = token.rsplit_once('_')?;
        if chat_id.is_empty() {
            return None;
        }
        Some(SearchToken {
            chat_id: chat_id.to_string(),
            message_id: message_id.parse().ok()?,
        })
    }
}

impl fmt::Display for SearchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.chat_id, self.message_id)
    }
}

/// Resolve search tokens against the message cache and order them newest first.
///
/// Tokens that are malformed, repeated, or point at an evicted message or an
/// unknown chat are dropped. Equal timestamps keep their token order.
pub fn assemble_messages(
    query: &SearchQuery,
    tokens: &[String],
    cache: &dyn MessageCache,
) -> HitList {
    if query.is_blank() || tokens.is_empty() {
        return empty_hits();
    }

    let mut seen = HashSet::new();
    let mut hits: Vec<MessageHit> = tokens
        .iter()
        .filter_map(|raw| {
            let token = SearchToken::parse(raw);
            if token.is_none() {
                log::trace!("dropping malformed search token {}", raw);
            }
            token
        })
        .filter(|token| seen.insert(token.clone()))
        .filter_map(|token| {
            let hit = cache.message(&token.chat_id, token.message_id);
            if hit.is_none() {
                log::trace!("search token {} not in message cache", token);
            }
            hit
        })
        .collect();

    if hits.is_empty() {
        return empty_hits();
    }

    hits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Arc::from(hits)
}

/// The chat a hit belongs to, for the row renderer.
pub fn owning_chat(hit: &MessageHit, directory: &dyn ChatDirectory) -> Option<ChatRecord> {
    directory.lookup(&hit.chat_id)
}

/// Render-time filter: a hit needs summary text and a known owning chat.
pub fn is_renderable(hit: &MessageHit, directory: &dyn ChatDirectory) -> bool {
    !hit.text.trim().is_empty() && owning_chat(hit, directory).is_some()
}
