use serde::{Deserialize, Serialize};

use super::TierIds;
use crate::config::SearchConfig;

/// Text and/or date hint the user is searching with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: Option<String>,
    pub date: Option<String>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        SearchQuery {
            text: Some(text.into()),
            date: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn has_text(&self) -> bool {
        !self.text().is_empty()
    }

    pub fn has_date(&self) -> bool {
        self.date.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Neither text nor date: the surface shows its default view.
    pub fn is_blank(&self) -> bool {
        !self.has_text() && !self.has_date()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActiveTiers {
    pub local: bool,
    pub global: bool,
    pub messages: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No search is active; render the recently contacted view instead.
    Default,
    Search(ActiveTiers),
}

pub fn local_tier_enabled(text: &str, config: &SearchConfig) -> bool {
    if text.is_empty() {
        return false;
    }
    !(text.starts_with(config.mention_marker)
        && text.chars().count() < config.min_mention_query_length)
}

/// Needs a long enough query and a completed remote search (both id lists present).
pub fn global_tier_enabled(text: &str, remote: &TierIds, config: &SearchConfig) -> bool {
    text.chars().count() >= config.min_query_length_for_global_search
        && remote.chat_ids.is_some()
        && remote.user_ids.is_some()
}

pub fn message_tier_enabled(query: &SearchQuery, token_count: usize) -> bool {
    !query.is_blank() && token_count > 0
}

pub fn classify(
    query: &SearchQuery,
    remote: &TierIds,
    token_count: usize,
    config: &SearchConfig,
) -> Classification {
    if query.is_blank() {
        return Classification::Default;
    }
    Classification::Search(ActiveTiers {
        local: local_tier_enabled(query.text(), config),
        global: global_tier_enabled(query.text(), remote, config),
        messages: message_tier_enabled(query, token_count),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_present() -> TierIds {
        TierIds {
            chat_ids: Some(vec![]),
            user_ids: Some(vec![]),
        }
    }

    #[test]
    fn test_blank_query_is_default() {
        let config = SearchConfig::default();
        assert_eq!(
            classify(&SearchQuery::default(), &remote_present(), 3, &config),
            Classification::Default
        );
        let empty_strings = SearchQuery {
            text: Some(String::new()),
            date: Some(String::new()),
        };
        assert_eq!(
            classify(&empty_strings, &remote_present(), 3, &config),
            Classification::Default
        );
    }

    #[test]
    fn test_mention_marker_length() {
        let config = SearchConfig::default();
        assert!(!local_tier_enabled("@", &config));
        assert!(local_tier_enabled("@a", &config));
        assert!(local_tier_enabled("a", &config));
        assert!(!local_tier_enabled("", &config));
    }

    #[test]
    fn test_global_needs_length_and_remote_lists() {
        let config = SearchConfig::default();
        assert!(!global_tier_enabled("abc", &remote_present(), &config));
        assert!(global_tier_enabled("abcd", &remote_present(), &config));
        let half = TierIds {
            chat_ids: Some(vec!["c1".to_string()]),
            user_ids: None,
        };
        assert!(!global_tier_enabled("abcd", &half, &config));
    }

    #[test]
    fn test_global_counts_characters_not_bytes() {
        let config = SearchConfig::default();
        // 3 characters, 9 bytes
        assert!(!global_tier_enabled("삼성전", &remote_present(), &config));
        assert!(global_tier_enabled("삼성전자", &remote_present(), &config));
    }

    #[test]
    fn test_date_only_enables_messages_only() {
        let config = SearchConfig::default();
        let query = SearchQuery::default().with_date("2025-02-10");
        assert_eq!(
            classify(&query, &remote_present(), 2, &config),
            Classification::Search(ActiveTiers {
                local: false,
                global: false,
                messages: true,
            })
        );
        assert_eq!(
            classify(&query, &remote_present(), 0, &config),
            Classification::Search(ActiveTiers::default())
        );
    }

    #[test]
    fn test_full_query_enables_all_tiers() {
        let config = SearchConfig::default();
        assert_eq!(
            classify(&SearchQuery::new("alice"), &remote_present(), 1, &config),
            Classification::Search(ActiveTiers {
                local: true,
                global: true,
                messages: true,
            })
        );
    }
}
