use std::sync::Arc;

use super::query::global_tier_enabled;
use super::sources::{ChatDirectory, ChatSort};
use super::{empty_ids, merge_unique, ResultIds, TierIds};
use crate::config::SearchConfig;

/// Remote directory matches: chats then users, deduplicated and sorted
/// without pinning the current user.
pub fn aggregate_global(
    query: &str,
    remote: &TierIds,
    config: &SearchConfig,
    directory: &dyn ChatDirectory,
    sort: &dyn ChatSort,
) -> ResultIds {
    if !global_tier_enabled(query, remote, config) {
        return empty_ids();
    }

    let chat_ids = remote.chat_ids.as_deref().unwrap_or_default();
    let user_ids = remote.user_ids.as_deref().unwrap_or_default();
    let merged = merge_unique([chat_ids, user_ids]);
    if merged.is_empty() {
        return empty_ids();
    }

    let sorted = sort.sort(merged, directory, true, &[]);
    Arc::from(merge_unique([sorted.as_slice()]))
}
