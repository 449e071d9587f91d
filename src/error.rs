use thiserror::Error;

/// Errors raised by the store, configuration and CLI layers.
///
/// The aggregation core never returns these: missing data there becomes an
/// empty tier or a no-op.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("store error: {0}")]
    Store(#[from] sqlite::Error),

    #[error("invalid search config: {0}")]
    Config(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SearchError> for String {
    fn from(e: SearchError) -> Self {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = SearchError::Config("less_list_items_amount must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "invalid search config: less_list_items_amount must be at least 1"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: SearchError = parse.unwrap_err().into();
        assert!(matches!(err, SearchError::Json(_)));
        let msg: String = err.into();
        assert!(msg.starts_with("json error:"));
    }
}
