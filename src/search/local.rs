use std::sync::Arc;

use super::query::local_tier_enabled;
use super::sources::{ChatDirectory, ChatSort, NameFilter};
use super::{empty_ids, merge_unique, Identifier, ResultIds, TierIds};
use crate::config::SearchConfig;

pub struct LocalInputs<'a> {
    pub query: &'a str,
    pub current_user_id: Option<&'a str>,
    pub contact_ids: &'a [Identifier],
    /// Ids the local search already matched among synced chats and users.
    pub results: &'a TierIds,
}

/// Contacts matching the query by name, followed by cached local chat and
/// user matches, deduplicated and sorted with the current user pinned.
pub fn aggregate_local(
    inputs: &LocalInputs<'_>,
    config: &SearchConfig,
    directory: &dyn ChatDirectory,
    name_filter: &dyn NameFilter,
    sort: &dyn ChatSort,
) -> ResultIds {
    if !local_tier_enabled(inputs.query, config) {
        return empty_ids();
    }

    let mut pool: Vec<Identifier> = Vec::with_capacity(inputs.contact_ids.len() + 1);
    if let Some(me) = inputs.current_user_id {
        pool.push(me.to_string());
    }
    pool.extend_from_slice(inputs.contact_ids);

    let found_contacts = name_filter.filter(&pool, directory, inputs.query);
    let chat_ids = inputs.results.chat_ids.as_deref().unwrap_or_default();
    let user_ids = inputs.results.user_ids.as_deref().unwrap_or_default();
    let merged = merge_unique([found_contacts.as_slice(), chat_ids, user_ids]);
    if merged.is_empty() {
        return empty_ids();
    }

    let pinned: Vec<Identifier> = inputs.current_user_id.map(str::to_string).into_iter().collect();
    let sorted = sort.sort(merged, directory, false, &pinned);
    Arc::from(merge_unique([sorted.as_slice()]))
}
