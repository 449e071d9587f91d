//! Search surface engine for a Telegram-style client: aggregates local,
//! global and message results, and drives throttled backward pagination.

pub mod config;
pub mod error;
pub mod logging;
pub mod search;
pub mod store;

pub use config::SearchConfig;
pub use error::SearchError;
pub use search::query::SearchQuery;
pub use search::session::{SearchInputs, SearchSession, SearchSources, SearchView};
pub use store::Store;
