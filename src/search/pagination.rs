use governor::clock::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};

use super::actions::{MessageSearchKind, MessageSearchRequest, SearchActions};
use super::sources::SyncMarkerSource;
use super::throttle::ThrottleGate;

/// Which end of the list the scroll container reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// Turns "reached the end" signals into throttled requests for older message hits.
#[derive(Debug)]
pub struct PaginationController<C: Clock = DefaultClock> {
    gate: ThrottleGate<C>,
}

impl<C: Clock> PaginationController<C> {
    pub fn new(gate: ThrottleGate<C>) -> Self {
        PaginationController { gate }
    }

    /// Request the next page of older results for `query_text`.
    ///
    /// Nothing is requested for forward scrolling, before the session has a
    /// sync marker, or while the throttle window is open. The caller is not
    /// told which of these happened.
    pub fn on_boundary(
        &mut self,
        direction: ScrollDirection,
        query_text: &str,
        sync: &dyn SyncMarkerSource,
        actions: &dyn SearchActions,
    ) {
        if direction != ScrollDirection::Backward {
            return;
        }
        if sync.last_sync().is_none() {
            log::debug!("skipping message pagination, session not synced");
            return;
        }

        let fired = self.gate.call(|| {
            actions.search_messages_global(MessageSearchRequest {
                kind: MessageSearchKind::Text,
                query: query_text.to_string(),
            })
        });
        if fired {
            log::debug!("requested older message hits for {:?}", query_text);
        } else {
            log::trace!("message pagination throttled");
        }
    }
}
