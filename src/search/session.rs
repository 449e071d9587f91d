//! One search session: classifies the query, runs the eligible tiers, and
//! owns the only mutable state of the surface (display window flags, the
//! pagination throttle, and memoized tier results).

use std::sync::Arc;

use governor::clock::{Clock, DefaultClock};
use serde::Serialize;

use super::actions::{OpenChatOptions, SearchActions};
use super::global::aggregate_global;
use super::local::{aggregate_local, LocalInputs};
use super::memo::Memo;
use super::messages::{assemble_messages, empty_hits, is_renderable, HitList, MessageHit};
use super::pagination::{PaginationController, ScrollDirection};
use super::query::{classify, Classification, SearchQuery};
use super::sources::{ChatDirectory, ChatSort, MessageCache, NameFilter, SyncMarkerSource};
use super::throttle::ThrottleGate;
use super::window::{DisplayWindow, Section, Tier};
use super::{Identifier, ResultIds, SearchStoreSnapshot, TierIds};
use crate::config::SearchConfig;

/// Everything one evaluation reads.
///
/// `revision` must change whenever the directory or message cache contents
/// change; it is part of the memo keys.
pub struct SearchInputs<'a> {
    pub query: &'a SearchQuery,
    pub current_user_id: Option<&'a str>,
    pub contact_ids: &'a [Identifier],
    pub snapshot: &'a SearchStoreSnapshot,
    pub revision: u64,
}

pub struct SearchSources<'a> {
    pub directory: &'a dyn ChatDirectory,
    pub messages: &'a dyn MessageCache,
    pub name_filter: &'a dyn NameFilter,
    pub sort: &'a dyn ChatSort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub local: Section,
    pub global: Section,
    pub messages: HitList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchView {
    /// No query and no date: show recently contacted chats.
    Default,
    /// Every tier is empty but a remote search is still running.
    Pending,
    /// Every tier is empty and nothing is outstanding.
    NothingFound,
    Results(SearchResults),
}

impl SearchView {
    /// Drop message hits the row renderer cannot draw: blank text or an
    /// owning chat missing from the directory.
    pub fn renderable(self, directory: &dyn ChatDirectory) -> SearchView {
        match self {
            SearchView::Results(mut results) => {
                if results.messages.iter().all(|h| is_renderable(h, directory)) {
                    return SearchView::Results(results);
                }
                let kept: Vec<MessageHit> = results
                    .messages
                    .iter()
                    .filter(|h| is_renderable(h, directory))
                    .cloned()
                    .collect();
                results.messages = if kept.is_empty() {
                    empty_hits()
                } else {
                    Arc::from(kept)
                };
                SearchView::Results(results)
            }
            other => other,
        }
    }
}

#[derive(Debug, PartialEq)]
struct LocalKey {
    text: String,
    current_user_id: Option<String>,
    contact_ids: Vec<Identifier>,
    results: TierIds,
    revision: u64,
}

#[derive(Debug, PartialEq)]
struct GlobalKey {
    text: String,
    results: TierIds,
    revision: u64,
}

#[derive(Debug, PartialEq)]
struct MessagesKey {
    query: SearchQuery,
    found_ids: Vec<String>,
    revision: u64,
}

pub struct SearchSession<C: Clock = DefaultClock> {
    config: SearchConfig,
    window: DisplayWindow,
    pagination: PaginationController<C>,
    local: Memo<LocalKey, ResultIds>,
    global: Memo<GlobalKey, ResultIds>,
    messages: Memo<MessagesKey, HitList>,
}

impl SearchSession<DefaultClock> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_clock(config, DefaultClock::default())
    }
}

impl<C: Clock> SearchSession<C> {
    pub fn with_clock(config: SearchConfig, clock: C) -> Self {
        let gate = ThrottleGate::with_clock(config.throttle_window_ms, clock);
        SearchSession {
            window: DisplayWindow::new(config.less_list_items_amount),
            pagination: PaginationController::new(gate),
            local: Memo::default(),
            global: Memo::default(),
            messages: Memo::default(),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn window(&self) -> &DisplayWindow {
        &self.window
    }

    pub fn evaluate(
        &mut self,
        inputs: &SearchInputs<'_>,
        sources: &SearchSources<'_>,
    ) -> SearchView {
        let snapshot = inputs.snapshot;
        let tiers = match classify(
            inputs.query,
            &snapshot.global_results,
            snapshot.found_ids.len(),
            &self.config,
        ) {
            Classification::Default => return SearchView::Default,
            Classification::Search(tiers) => tiers,
        };
        log::debug!("search tiers for {:?}: {:?}", inputs.query, tiers);

        let config = &self.config;
        let text = inputs.query.text();

        let local = self.local.get_or_compute(
            LocalKey {
                text: text.to_string(),
                current_user_id: inputs.current_user_id.map(str::to_string),
                contact_ids: inputs.contact_ids.to_vec(),
                results: snapshot.local_results.clone(),
                revision: inputs.revision,
            },
            || {
                let local_inputs = LocalInputs {
                    query: text,
                    current_user_id: inputs.current_user_id,
                    contact_ids: inputs.contact_ids,
                    results: &snapshot.local_results,
                };
                aggregate_local(
                    &local_inputs,
                    config,
                    sources.directory,
                    sources.name_filter,
                    sources.sort,
                )
            },
        );

        let global = self.global.get_or_compute(
            GlobalKey {
                text: text.to_string(),
                results: snapshot.global_results.clone(),
                revision: inputs.revision,
            },
            || {
                aggregate_global(
                    text,
                    &snapshot.global_results,
                    config,
                    sources.directory,
                    sources.sort,
                )
            },
        );

        let messages = self.messages.get_or_compute(
            MessagesKey {
                query: inputs.query.clone(),
                found_ids: snapshot.found_ids.clone(),
                revision: inputs.revision,
            },
            || assemble_messages(inputs.query, &snapshot.found_ids, sources.messages),
        );

        if local.is_empty() && global.is_empty() && messages.is_empty() {
            return if snapshot.fetching_status.is_fetching() {
                SearchView::Pending
            } else {
                log::debug!("nothing found for {:?}", inputs.query);
                SearchView::NothingFound
            };
        }

        SearchView::Results(SearchResults {
            local: self.window.section(Tier::Local, local),
            global: self.window.section(Tier::Global, global),
            messages,
        })
    }

    pub fn toggle(&mut self, tier: Tier) {
        self.window.toggle(tier);
    }

    /// The search was closed: collapse the tiers and drop cached results.
    pub fn dismiss(&mut self) {
        self.window.reset();
        self.local.clear();
        self.global.clear();
        self.messages.clear();
    }

    /// Open a picked result. The current user's own chat is not recorded as recently found.
    pub fn select_chat(
        &self,
        id: &str,
        current_user_id: Option<&str>,
        actions: &dyn SearchActions,
    ) {
        actions.open_chat(
            id,
            OpenChatOptions {
                should_replace_history: true,
            },
        );
        if current_user_id != Some(id) {
            actions.add_recently_found_chat_id(id);
        }
    }

    /// Use a picked result as the search scope instead of opening it.
    pub fn pick_scope(&self, id: &str, actions: &dyn SearchActions) {
        actions.set_global_search_chat_id(id);
    }

    pub fn on_scroll_boundary(
        &mut self,
        direction: ScrollDirection,
        query: &SearchQuery,
        sync: &dyn SyncMarkerSource,
        actions: &dyn SearchActions,
    ) {
        self.pagination
            .on_boundary(direction, query.text(), sync, actions);
    }
}
