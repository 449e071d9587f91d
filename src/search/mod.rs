pub mod actions;
pub mod global;
pub mod local;
pub mod memo;
pub mod messages;
pub mod pagination;
pub mod query;
pub mod session;
pub mod sources;
pub mod throttle;
pub mod window;

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

/// Opaque id of a contact, chat or user.
pub type Identifier = String;

/// Ordered, duplicate-free ids of one result tier.
pub type ResultIds = Arc<[Identifier]>;

static EMPTY_IDS: LazyLock<ResultIds> = LazyLock::new(|| Arc::from(Vec::new()));

/// The shared empty tier. Every call hands out the same allocation, so callers
/// can detect "unchanged and empty" with `Arc::ptr_eq`.
pub fn empty_ids() -> ResultIds {
    Arc::clone(&EMPTY_IDS)
}

/// Chat and user ids returned by a local or remote search.
/// `None` means that list has not been received yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierIds {
    pub chat_ids: Option<Vec<Identifier>>,
    pub user_ids: Option<Vec<Identifier>>,
}

/// Outstanding remote requests of the search store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchingStatus {
    pub chats: bool,
    pub messages: bool,
}

impl FetchingStatus {
    pub fn is_fetching(&self) -> bool {
        self.chats || self.messages
    }
}

/// What the search-results store currently holds for the active query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchStoreSnapshot {
    pub local_results: TierIds,
    pub global_results: TierIds,
    /// Message hits as `chatId_messageId` tokens.
    pub found_ids: Vec<String>,
    pub fetching_status: FetchingStatus,
}

/// Concatenate id lists, keeping the first occurrence of each id.
pub(crate) fn merge_unique<'a, I>(lists: I) -> Vec<Identifier>
where
    I: IntoIterator<Item = &'a [Identifier]>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut merged = Vec::new();
    for list in lists {
        for id in list {
            if seen.insert(id.as_str()) {
                merged.push(id.clone());
            }
        }
    }
    merged
}
