use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::SearchError;
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenChatOptions {
    pub should_replace_history: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSearchKind {
    Text,
}

/// Ask the search-results store for the next page of older message hits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSearchRequest {
    pub kind: MessageSearchKind,
    pub query: String,
}

/// Commands the search surface issues. All of them are fire-and-forget.
pub trait SearchActions {
    fn open_chat(&self, id: &str, options: OpenChatOptions);
    fn add_recently_found_chat_id(&self, id: &str);
    fn search_messages_global(&self, request: MessageSearchRequest);
    /// Scope the search to a chat instead of opening it.
    fn set_global_search_chat_id(&self, id: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchAction {
    OpenChat { id: String, options: OpenChatOptions },
    AddRecentlyFoundChatId { id: String },
    SearchMessagesGlobal { request: MessageSearchRequest },
    SetGlobalSearchChatId { id: String },
}

impl SearchAction {
    /// Apply the part of an action the local store owns. Returns whether the
    /// store was touched; the other actions belong to navigation and network.
    pub fn persist(&self, store: &Store) -> Result<bool, SearchError> {
        match self {
            SearchAction::AddRecentlyFoundChatId { id } => {
                store.add_recently_found(id)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Forwards actions over an unbounded channel to whoever executes them.
#[derive(Debug, Clone)]
pub struct ActionSender {
    tx: UnboundedSender<SearchAction>,
}

impl ActionSender {
    pub fn channel() -> (Self, UnboundedReceiver<SearchAction>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ActionSender { tx }, rx)
    }

    fn send(&self, action: SearchAction) {
        if let Err(e) = self.tx.send(action) {
            log::warn!("search action dropped, executor gone: {:?}", e.0);
        }
    }
}

impl SearchActions for ActionSender {
    fn open_chat(&self, id: &str, options: OpenChatOptions) {
        self.send(SearchAction::OpenChat {
            id: id.to_string(),
            options,
        });
    }

    fn add_recently_found_chat_id(&self, id: &str) {
        self.send(SearchAction::AddRecentlyFoundChatId { id: id.to_string() });
    }

    fn search_messages_global(&self, request: MessageSearchRequest) {
        self.send(SearchAction::SearchMessagesGlobal { request });
    }

    fn set_global_search_chat_id(&self, id: &str) {
        self.send(SearchAction::SetGlobalSearchChatId { id: id.to_string() });
    }
}
