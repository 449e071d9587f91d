use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::store::settings::SEARCH_CONFIG_KEY;
use crate::store::Store;

pub const MIN_QUERY_LENGTH_FOR_GLOBAL_SEARCH: usize = 4;
pub const LESS_LIST_ITEMS_AMOUNT: usize = 5;
pub const THROTTLE_WINDOW_MS: u64 = 500;
pub const MENTION_MARKER: char = '@';
pub const MIN_MENTION_QUERY_LENGTH: usize = 2;

/// Tunables of the search surface. Every field falls back to its default
/// when missing from the stored JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub min_query_length_for_global_search: usize,
    pub less_list_items_amount: usize,
    pub throttle_window_ms: u64,
    pub mention_marker: char,
    /// Mention queries shorter than this (marker included) skip the local tier.
    pub min_mention_query_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            min_query_length_for_global_search: MIN_QUERY_LENGTH_FOR_GLOBAL_SEARCH,
            less_list_items_amount: LESS_LIST_ITEMS_AMOUNT,
            throttle_window_ms: THROTTLE_WINDOW_MS,
            mention_marker: MENTION_MARKER,
            min_mention_query_length: MIN_MENTION_QUERY_LENGTH,
        }
    }
}

impl SearchConfig {
    pub fn from_json(json: &str) -> Result<Self, SearchError> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config saved in the store, or the defaults if none is saved.
    pub fn load(store: &Store) -> Result<Self, SearchError> {
        match store.get_setting(SEARCH_CONFIG_KEY)? {
            Some(json) => Self::from_json(&json),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, store: &Store) -> Result<(), SearchError> {
        self.validate()?;
        store.set_setting(SEARCH_CONFIG_KEY, &serde_json::to_string(self)?)?;
        Ok(())
    }

    /// Drop the saved config so the next load returns the defaults.
    pub fn reset(store: &Store) -> Result<(), SearchError> {
        store.remove_setting(SEARCH_CONFIG_KEY)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.less_list_items_amount == 0 {
            return Err(SearchError::Config(
                "less_list_items_amount must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.min_query_length_for_global_search, 4);
        assert_eq!(config.less_list_items_amount, 5);
        assert_eq!(config.throttle_window_ms, 500);
        assert_eq!(config.mention_marker, '@');
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SearchConfig::from_json(r#"{"throttle_window_ms": 250}"#).unwrap();
        assert_eq!(config.throttle_window_ms, 250);
        assert_eq!(config.less_list_items_amount, LESS_LIST_ITEMS_AMOUNT);
    }

    #[test]
    fn test_zero_preview_rejected() {
        let err = SearchConfig::from_json(r#"{"less_list_items_amount": 0}"#).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn test_load_missing_uses_defaults() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(SearchConfig::load(&store).unwrap(), SearchConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let store = Store::open_in_memory().unwrap();
        let config = SearchConfig {
            min_query_length_for_global_search: 3,
            ..SearchConfig::default()
        };
        config.save(&store).unwrap();
        assert_eq!(SearchConfig::load(&store).unwrap(), config);
    }

    #[test]
    fn test_load_invalid_json_errors() {
        let store = Store::open_in_memory().unwrap();
        store.set_setting(SEARCH_CONFIG_KEY, "not json").unwrap();
        assert!(matches!(
            SearchConfig::load(&store),
            Err(SearchError::Json(_))
        ));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let store = Store::open_in_memory().unwrap();
        SearchConfig {
            less_list_items_amount: 8,
            ..SearchConfig::default()
        }
        .save(&store)
        .unwrap();
        SearchConfig::reset(&store).unwrap();
        assert_eq!(SearchConfig::load(&store).unwrap(), SearchConfig::default());
    }
}
